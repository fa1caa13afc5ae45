use axum::{
    extract::State,
    response::Json,
    routing::{get, patch},
    Router,
};
use std::sync::Arc;

use crate::{
    errors::ApiError,
    extract::{parse_object_id, JsonBody, PathParam},
    models::{AlreadyExists, CreateUser, Document, InsertOneResult, InsertOutcome, UpdateResult},
    AppState,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{email}", get(get_user))
        .route("/admin/{id}", patch(make_admin))
        .route("/premium/{id}", patch(make_premium))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "List of all users", body = Vec<serde_json::Value>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let users = state.db.get_all_users().await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/users/{email}",
    tag = "users",
    params(
        ("email" = String, Path, description = "User email")
    ),
    responses(
        (status = 200, description = "User document", body = serde_json::Value),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    PathParam(email): PathParam<String>,
) -> Result<Json<Document>, ApiError> {
    let user = state
        .db
        .get_user_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Insert acknowledgment, or an 'already exists' message with a null insertedId", body = InsertOneResult),
        (status = 400, description = "Missing or invalid email"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonBody(user): JsonBody<CreateUser>,
) -> Result<Json<InsertOutcome>, ApiError> {
    let user = user.into_document()?;

    let outcome = match state.db.create_user(user).await? {
        Some(id) => InsertOutcome::Inserted(InsertOneResult::new(id)),
        None => InsertOutcome::AlreadyExists(AlreadyExists::new("User already exists")),
    };

    Ok(Json(outcome))
}

#[utoipa::path(
    patch,
    path = "/users/admin/{id}",
    tag = "users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Update result", body = UpdateResult),
        (status = 400, description = "Invalid user ID"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn make_admin(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
) -> Result<Json<UpdateResult>, ApiError> {
    let id = parse_object_id(&id)?;
    let result = state.db.make_admin(id).await?;
    if result.modified_count > 0 {
        tracing::info!("User {} promoted to admin", id);
    }
    Ok(Json(result))
}

#[utoipa::path(
    patch,
    path = "/users/premium/{id}",
    tag = "users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Update result", body = UpdateResult),
        (status = 400, description = "Invalid user ID"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn make_premium(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
) -> Result<Json<UpdateResult>, ApiError> {
    let id = parse_object_id(&id)?;
    let result = state.db.make_premium(id).await?;
    Ok(Json(result))
}
