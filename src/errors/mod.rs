use axum::http::StatusCode;
use thiserror::Error;

/// How loudly an error should be reported in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Storage or upstream failure that needs attention
    Critical,
    /// Unusual but handled, e.g. the payment provider being unconfigured
    Important,
    /// Client mistakes such as malformed input
    Minor,
    /// Normal control flow such as a lookup that found nothing
    Expected,
}

/// Common trait for all custom error types in the application
pub trait AppError: std::error::Error + Send + Sync + 'static {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get the error code for frontend handling
    fn error_code(&self) -> &'static str;

    fn error_severity(&self) -> ErrorSeverity;
}

/// Implements `IntoResponse` for an `AppError` type: logs at the level
/// matching its severity and renders `{"error", "code", "status"}`.
macro_rules! impl_into_response {
    ($error_type:ty) => {
        impl axum::response::IntoResponse for $error_type {
            fn into_response(self) -> axum::response::Response {
                use crate::errors::{AppError, ErrorSeverity};
                use axum::response::Json;
                use serde_json::json;

                let status = self.status_code();
                match self.error_severity() {
                    ErrorSeverity::Critical => {
                        tracing::error!(code = self.error_code(), "{}", self)
                    }
                    ErrorSeverity::Important => {
                        tracing::warn!(code = self.error_code(), "{}", self)
                    }
                    ErrorSeverity::Minor => {
                        tracing::debug!(code = self.error_code(), "{}", self)
                    }
                    ErrorSeverity::Expected => {}
                }

                let body = Json(json!({
                    "error": self.user_message(),
                    "code": self.error_code(),
                    "status": status.as_u16()
                }));

                (status, body).into_response()
            }
        }
    };
}

pub(crate) use impl_into_response;

/// Generic API error returned by every route
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("Internal server error: {message}")]
    InternalServerError { message: String },
}

impl AppError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            ApiError::BadRequest { message } => message.clone(),
            ApiError::NotFound { resource } => format!("{} not found", resource),
            ApiError::InternalServerError { .. } => "An internal error occurred".to_string(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::InternalServerError { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    fn error_severity(&self) -> ErrorSeverity {
        match self {
            ApiError::InternalServerError { .. } => ErrorSeverity::Critical,
            ApiError::BadRequest { .. } => ErrorSeverity::Minor,
            ApiError::NotFound { .. } => ErrorSeverity::Expected,
        }
    }
}

impl_into_response!(ApiError);

/// Utility functions for common error creation patterns
impl ApiError {
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest { message: message.into() }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn internal_server_error<S: Into<String>>(message: S) -> Self {
        Self::InternalServerError { message: message.into() }
    }
}

/// Storage errors surface as 500s; the detail only reaches the log.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal_server_error(format!("{:#}", err))
    }
}

pub mod payment;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    async fn body_of(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn bad_request_renders_structured_body() {
        let response = ApiError::bad_request("email is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(response).await,
            serde_json::json!({"error": "email is required", "code": "BAD_REQUEST", "status": 400})
        );
    }

    #[tokio::test]
    async fn storage_details_stay_out_of_the_response() {
        let err: ApiError = anyhow::anyhow!("connection refused").context("loading users").into();
        assert!(err.to_string().contains("connection refused"));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(body["error"], "An internal error occurred");
        assert!(!body.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn payment_errors_map_to_gateway_statuses() {
        let rejected = payment::PaymentError::ProviderRejected {
            status: 402,
            details: "card_error".to_string(),
        };
        assert_eq!(rejected.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            payment::PaymentError::NotConfigured.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
