use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{
    errors::ApiError,
    extract::{parse_object_id, JsonBody, PathParam},
    models::{CreateFavourite, DeleteResult, Document, InsertOneResult},
    AppState,
};

/// `GET /{id}` takes an email and `DELETE /{id}` a storage id; axum needs one
/// parameter name per segment.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_favourite))
        .route("/{id}", get(list_favourites).delete(delete_favourite))
}

#[utoipa::path(
    get,
    path = "/favourites/{email}",
    tag = "favourites",
    params(
        ("email" = String, Path, description = "Owner email")
    ),
    responses(
        (status = 200, description = "Favourites saved by this user", body = Vec<serde_json::Value>)
    )
)]
pub async fn list_favourites(
    State(state): State<Arc<AppState>>,
    PathParam(email): PathParam<String>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.db.get_favourites_by_email(&email).await?))
}

#[utoipa::path(
    post,
    path = "/favourites",
    tag = "favourites",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Insert acknowledgment", body = InsertOneResult),
        (status = 400, description = "Missing or invalid email")
    )
)]
pub async fn create_favourite(
    State(state): State<Arc<AppState>>,
    JsonBody(favourite): JsonBody<CreateFavourite>,
) -> Result<Json<InsertOneResult>, ApiError> {
    let favourite = favourite.into_document()?;
    let id = state.db.create_favourite(favourite).await?;
    Ok(Json(InsertOneResult::new(id)))
}

#[utoipa::path(
    delete,
    path = "/favourites/{id}",
    tag = "favourites",
    params(
        ("id" = String, Path, description = "Favourite ID")
    ),
    responses(
        (status = 200, description = "Delete result", body = DeleteResult),
        (status = 400, description = "Invalid ID")
    )
)]
pub async fn delete_favourite(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
) -> Result<Json<DeleteResult>, ApiError> {
    let id = parse_object_id(&id)?;
    Ok(Json(state.db.delete_favourite(id).await?))
}
