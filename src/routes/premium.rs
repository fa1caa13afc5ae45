use axum::{
    extract::State,
    response::Json,
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::{
    errors::ApiError,
    extract::{JsonBody, PathParam},
    models::{CreatePremiumRequest, DeleteResult, Document, InsertOneResult},
    AppState,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_premium_requests).post(create_premium_request))
        .route("/{id}", delete(delete_premium_requests))
}

#[utoipa::path(
    get,
    path = "/premium",
    tag = "premium",
    responses(
        (status = 200, description = "Pending premium requests", body = Vec<serde_json::Value>)
    )
)]
pub async fn list_premium_requests(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.db.get_premium_requests().await?))
}

#[utoipa::path(
    post,
    path = "/premium",
    tag = "premium",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Insert acknowledgment", body = InsertOneResult),
        (status = 400, description = "Missing bioDataId")
    )
)]
pub async fn create_premium_request(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreatePremiumRequest>,
) -> Result<Json<InsertOneResult>, ApiError> {
    let request = request.into_document()?;
    let id = state.db.create_premium_request(request).await?;
    Ok(Json(InsertOneResult::new(id)))
}

#[utoipa::path(
    delete,
    path = "/premium/{id}",
    tag = "premium",
    params(
        ("id" = String, Path, description = "bioDataId whose requests are removed")
    ),
    responses(
        (status = 200, description = "Delete result", body = DeleteResult)
    )
)]
pub async fn delete_premium_requests(
    State(state): State<Arc<AppState>>,
    PathParam(bio_data_id): PathParam<String>,
) -> Result<Json<DeleteResult>, ApiError> {
    let result = state.db.delete_premium_requests(bio_data_id.trim()).await?;
    Ok(Json(result))
}
