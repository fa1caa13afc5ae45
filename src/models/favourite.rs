use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::{strip_reserved, Fields};
use super::user::validate_email;
use crate::errors::ApiError;

/// A biodata bookmarked by the user identified by `email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFavourite {
    pub email: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl CreateFavourite {
    pub fn into_document(self) -> Result<Fields, ApiError> {
        let email = validate_email(&self.email)?;
        let mut fields = self.fields;
        strip_reserved(&mut fields, &[]);
        fields.insert("email".to_string(), Value::String(email));
        Ok(fields)
    }
}
