use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Acknowledgment for a single inserted document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    /// Storage identifier of the new document
    pub inserted_id: Uuid,
    /// Sequential biodata number, only present for biodata inserts
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub biodata_id: Option<i64>,
}

impl InsertOneResult {
    pub fn new(inserted_id: Uuid) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
            biodata_id: None,
        }
    }

    pub fn with_biodata_id(inserted_id: Uuid, biodata_id: i64) -> Self {
        Self {
            biodata_id: Some(biodata_id),
            ..Self::new(inserted_id)
        }
    }
}

/// Returned instead of an insert when the uniqueness key is already taken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlreadyExists {
    pub message: String,
    /// Always null
    pub inserted_id: Option<Uuid>,
}

impl AlreadyExists {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            inserted_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InsertOutcome {
    Inserted(InsertOneResult),
    AlreadyExists(AlreadyExists),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: i64,
    pub modified_count: i64,
    pub upserted_id: Option<Uuid>,
    pub upserted_count: i64,
}

impl UpdateResult {
    pub fn new(matched_count: i64, modified_count: i64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_id: None,
            upserted_count: 0,
        }
    }
}

/// Result of a biodata POST: a fresh insert or a merge into the existing record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BiodataWriteOutcome {
    Inserted(InsertOneResult),
    Updated(UpdateResult),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: i64,
}

impl DeleteResult {
    pub fn new(deleted_count: i64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn already_exists_reports_null_inserted_id() {
        let value = serde_json::to_value(AlreadyExists::new("User already exists")).unwrap();
        assert_eq!(
            value,
            json!({"message": "User already exists", "insertedId": null})
        );
    }

    #[test]
    fn insert_result_omits_biodata_id_unless_set() {
        let id = Uuid::new_v4();
        let plain = serde_json::to_value(InsertOneResult::new(id)).unwrap();
        assert!(plain.get("biodataId").is_none());

        let biodata = serde_json::to_value(InsertOneResult::with_biodata_id(id, 7)).unwrap();
        assert_eq!(biodata["biodataId"], json!(7));
        assert_eq!(biodata["insertedId"], json!(id.to_string()));
    }

    #[test]
    fn untagged_outcomes_round_trip_by_shape() {
        let updated: BiodataWriteOutcome = serde_json::from_value(json!({
            "acknowledged": true,
            "matchedCount": 1,
            "modifiedCount": 0,
            "upsertedId": null,
            "upsertedCount": 0
        }))
        .unwrap();
        assert_eq!(updated, BiodataWriteOutcome::Updated(UpdateResult::new(1, 0)));

        let exists: InsertOutcome =
            serde_json::from_value(json!({"message": "Story already exists", "insertedId": null}))
                .unwrap();
        assert!(matches!(exists, InsertOutcome::AlreadyExists(_)));
    }
}
