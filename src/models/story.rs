use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::{strip_reserved, Fields};
use super::user::validate_email;
use crate::errors::ApiError;

/// Success story. One per `userEmail`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStory {
    #[serde(rename = "userEmail")]
    pub user_email: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl CreateStory {
    pub fn into_document(self) -> Result<Fields, ApiError> {
        let user_email = validate_email(&self.user_email)?;
        let mut fields = self.fields;
        strip_reserved(&mut fields, &[]);
        fields.insert("userEmail".to_string(), Value::String(user_email));
        Ok(fields)
    }
}
