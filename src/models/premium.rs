use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::{strip_reserved, Fields};
use crate::errors::ApiError;

pub const BIO_DATA_ID_FIELD: &str = "bioDataId";

/// Request to mark a biodata as premium.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePremiumRequest {
    #[serde(rename = "bioDataId")]
    pub bio_data_id: Value,
    #[serde(flatten)]
    pub fields: Fields,
}

impl CreatePremiumRequest {
    pub fn into_document(self) -> Result<Fields, ApiError> {
        match &self.bio_data_id {
            Value::Number(_) => {}
            Value::String(s) if !s.trim().is_empty() => {}
            other => {
                return Err(ApiError::bad_request(format!(
                    "bioDataId must be a number or string, got {}",
                    other
                )))
            }
        }
        let mut fields = self.fields;
        strip_reserved(&mut fields, &[]);
        fields.insert(BIO_DATA_ID_FIELD.to_string(), self.bio_data_id);
        Ok(fields)
    }
}
