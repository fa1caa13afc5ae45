use axum::http::StatusCode;
use thiserror::Error;

use super::{AppError, ErrorSeverity};

/// Errors related to payment-intent creation
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Price must be a positive, finite number, got {price}")]
    InvalidPrice { price: f64 },

    #[error("Price {price} does not match the configured price {expected}")]
    PriceMismatch { price: f64, expected: f64 },

    #[error("Payment provider is not configured")]
    NotConfigured,

    #[error("Payment provider returned {status}: {details}")]
    ProviderRejected { status: u16, details: String },

    #[error("Payment provider request failed: {details}")]
    Transport { details: String },

    #[error("Payment provider response was malformed: {details}")]
    MalformedResponse { details: String },
}

impl AppError for PaymentError {
    fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::InvalidPrice { .. } | PaymentError::PriceMismatch { .. } => {
                StatusCode::BAD_REQUEST
            }
            PaymentError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            PaymentError::ProviderRejected { .. }
            | PaymentError::Transport { .. }
            | PaymentError::MalformedResponse { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn user_message(&self) -> String {
        match self {
            PaymentError::InvalidPrice { .. } => "Price must be a positive number".to_string(),
            PaymentError::PriceMismatch { expected, .. } => {
                format!("Price must be {}", expected)
            }
            PaymentError::NotConfigured => "Payments are not available".to_string(),
            PaymentError::ProviderRejected { .. }
            | PaymentError::Transport { .. }
            | PaymentError::MalformedResponse { .. } => {
                "Payment provider request failed".to_string()
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            PaymentError::InvalidPrice { .. } => "PAYMENT_INVALID_PRICE",
            PaymentError::PriceMismatch { .. } => "PAYMENT_PRICE_MISMATCH",
            PaymentError::NotConfigured => "PAYMENT_NOT_CONFIGURED",
            PaymentError::ProviderRejected { .. } => "PAYMENT_PROVIDER_REJECTED",
            PaymentError::Transport { .. } => "PAYMENT_PROVIDER_UNREACHABLE",
            PaymentError::MalformedResponse { .. } => "PAYMENT_PROVIDER_MALFORMED",
        }
    }

    fn error_severity(&self) -> ErrorSeverity {
        match self {
            PaymentError::InvalidPrice { .. } => ErrorSeverity::Minor,
            // a mismatch means someone is tampering with the checkout form
            PaymentError::PriceMismatch { .. } => ErrorSeverity::Important,
            PaymentError::NotConfigured => ErrorSeverity::Important,
            _ => ErrorSeverity::Critical,
        }
    }
}

impl_into_response!(PaymentError);

