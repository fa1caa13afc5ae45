use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::{strip_reserved, Fields};
use crate::errors::ApiError;

pub const ROLE_FIELD: &str = "role";
pub const PREMIUM_FIELD: &str = "isPremium";
pub const ROLE_ADMIN: &str = "admin";

/// Registration payload. Any extra profile fields are kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub email: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl CreateUser {
    /// Builds the stored document. Privilege fields can only be set through
    /// the admin endpoints, so they are dropped here.
    pub fn into_document(self) -> Result<Fields, ApiError> {
        let email = validate_email(&self.email)?;
        let mut fields = self.fields;
        strip_reserved(&mut fields, &[ROLE_FIELD, PREMIUM_FIELD]);
        fields.insert("email".to_string(), Value::String(email));
        Ok(fields)
    }
}

pub fn validate_email(email: &str) -> Result<String, ApiError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ApiError::bad_request("email is required"));
    }
    if !email.contains('@') {
        return Err(ApiError::bad_request(format!("'{}' is not a valid email", email)));
    }
    Ok(email.to_string())
}
