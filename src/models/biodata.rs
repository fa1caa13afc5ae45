use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use super::document::{coerce_number, strip_reserved, Fields};
use crate::errors::ApiError;

pub const USER_ID_FIELD: &str = "userId";
pub const BIODATA_ID_FIELD: &str = "biodataId";
pub const AGE_FIELD: &str = "age";
pub const BIODATA_TYPE_FIELD: &str = "biodataType";
pub const PERMANENT_DIVISION_FIELD: &str = "permanentDivision";

/// Biodata create-or-update payload. `userId` is the uniqueness key; every
/// other field is free-form profile data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiodataPayload {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl BiodataPayload {
    /// Returns the owning user id and the fields to store. The sequential
    /// `biodataId` is server-assigned and never taken from the payload; `age`
    /// is stored as a JSON number so range filters compare numerically.
    pub fn into_parts(self) -> Result<(String, Fields), ApiError> {
        let user_id = self.user_id.trim().to_string();
        if user_id.is_empty() {
            return Err(ApiError::bad_request("userId is required"));
        }

        let mut fields = self.fields;
        strip_reserved(&mut fields, &[BIODATA_ID_FIELD]);

        let age = fields.get(AGE_FIELD).filter(|v| !v.is_null()).cloned();
        if let Some(age) = age {
            let age = coerce_number(&age).ok_or_else(|| {
                ApiError::bad_request(format!("age must be a number, got {}", age))
            })?;
            fields.insert(AGE_FIELD.to_string(), age);
        }

        fields.insert(USER_ID_FIELD.to_string(), Value::String(user_id.clone()));
        Ok((user_id, fields))
    }
}

/// Optional filters for `GET /biodatas`. Empty values count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BiodataQuery {
    /// Minimum age, inclusive
    pub age_from: Option<String>,
    /// Maximum age, inclusive
    pub age_to: Option<String>,
    /// Exact biodata type, e.g. "Male" or "Female"
    pub biodata_type: Option<String>,
    /// Exact permanent division
    pub permanent_division: Option<String>,
    /// Comma-separated storage identifiers
    pub ids: Option<String>,
}
