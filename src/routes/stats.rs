use axum::{extract::State, response::Json, routing::get, Router};
use std::sync::Arc;

use crate::{errors::ApiError, models::AdminStats, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/admin-stats", get(admin_stats))
}

#[utoipa::path(
    get,
    path = "/admin-stats",
    tag = "stats",
    responses(
        (status = 200, description = "Dashboard counts and revenue", body = AdminStats)
    )
)]
pub async fn admin_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AdminStats>, ApiError> {
    Ok(Json(state.db.admin_stats().await?))
}
