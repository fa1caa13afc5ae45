use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::document::{coerce_number, strip_reserved, Fields};
use crate::errors::ApiError;

pub const AMOUNT_FIELD: &str = "amount";

/// Payment record written after a successful client-side payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckout {
    pub amount: Value,
    #[serde(flatten)]
    pub fields: Fields,
}

impl CreateCheckout {
    pub fn into_document(self) -> Result<Fields, ApiError> {
        let amount = coerce_number(&self.amount)
            .filter(|n| n.as_f64().is_some_and(|f| f >= 0.0))
            .ok_or_else(|| {
                ApiError::bad_request(format!(
                    "amount must be a non-negative number, got {}",
                    self.amount
                ))
            })?;

        let mut fields = self.fields;
        strip_reserved(&mut fields, &[]);
        fields.insert(AMOUNT_FIELD.to_string(), amount);
        Ok(fields)
    }
}

/// One aggregation group summing `amount` over every checkout record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotal {
    /// Group key; always null because all records form one group
    #[serde(rename = "_id")]
    pub group: Option<String>,
    #[schema(value_type = f64)]
    pub total_amount: serde_json::Number,
}

impl CheckoutTotal {
    /// Whole sums render as integers (`35`), others keep their fraction.
    pub fn new(total: f64) -> Self {
        let total_amount = if total.fract() == 0.0 && total.abs() < i64::MAX as f64 {
            serde_json::Number::from(total as i64)
        } else {
            serde_json::Number::from_f64(total).unwrap_or_else(|| serde_json::Number::from(0))
        };
        Self { group: None, total_amount }
    }
}
