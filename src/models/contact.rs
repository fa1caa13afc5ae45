use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::{strip_reserved, Fields};
use super::user::validate_email;
use crate::errors::ApiError;

pub const STATUS_FIELD: &str = "status";
pub const STATUS_APPROVED: &str = "Approved";

/// Request to see a biodata's contact information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContactRequest {
    pub email: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl CreateContactRequest {
    /// `status` starts unset; only the approve endpoint writes it.
    pub fn into_document(self) -> Result<Fields, ApiError> {
        let email = validate_email(&self.email)?;
        let mut fields = self.fields;
        strip_reserved(&mut fields, &[STATUS_FIELD]);
        fields.insert("email".to_string(), Value::String(email));
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clients_cannot_self_approve() {
        let request: CreateContactRequest = serde_json::from_value(json!({
            "email": "seeker@example.com",
            "status": "Approved",
            "biodataId": 12
        }))
        .unwrap();
        let doc = request.into_document().unwrap();
        assert!(!doc.contains_key("status"));
        assert_eq!(doc["biodataId"], json!(12));
    }
}
