pub mod config;
pub mod db;
pub mod errors;
pub mod extract;
pub mod models;
pub mod payments;
pub mod routes;
pub mod seed;
pub mod swagger;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(test)]
mod tests;

use axum::{extract::State, routing::get, Json, Router};
use config::Config;
use db::Database;
use payments::PaymentProvider;
use std::sync::Arc;
use tower::Layer;
use tower_http::{
    cors::CorsLayer, normalize_path::NormalizePathLayer, trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
    /// `None` when no payment provider is configured
    pub payments: Option<Arc<dyn PaymentProvider>>,
}

/// Liveness probe
pub async fn root() -> &'static str {
    "wedding is running"
}

/// Health check endpoint for monitoring
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let database = state.db.ping().await;
    Json(serde_json::json!({
        "status": if database { "ok" } else { "degraded" },
        "database": database
    }))
}

/// Full application router with its layers and state applied.
///
/// Collection routes also answer with a trailing slash (`/users/`). The
/// Swagger UI keeps its own `/swagger-ui/` redirect, so it is routed before
/// the path normalization.
pub fn app(state: Arc<AppState>) -> Router {
    let api = NormalizePathLayer::trim_trailing_slash()
        .layer(routes::api_router().with_state(state.clone()));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(swagger::create_swagger_router())
        .fallback_service(api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
