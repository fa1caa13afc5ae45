use axum::{extract::State, response::Json, routing::get, Router};
use std::sync::Arc;

use crate::{
    errors::ApiError,
    extract::JsonBody,
    models::{AlreadyExists, CreateStory, Document, InsertOneResult, InsertOutcome},
    AppState,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_stories).post(create_story))
}

#[utoipa::path(
    get,
    path = "/stories",
    tag = "stories",
    responses(
        (status = 200, description = "All success stories", body = Vec<serde_json::Value>)
    )
)]
pub async fn list_stories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.db.get_all_stories().await?))
}

#[utoipa::path(
    post,
    path = "/stories",
    tag = "stories",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Insert acknowledgment, or an 'already exists' message with a null insertedId", body = InsertOneResult),
        (status = 400, description = "Missing or invalid userEmail")
    )
)]
pub async fn create_story(
    State(state): State<Arc<AppState>>,
    JsonBody(story): JsonBody<CreateStory>,
) -> Result<Json<InsertOutcome>, ApiError> {
    let story = story.into_document()?;

    let outcome = match state.db.create_story(story).await? {
        Some(id) => InsertOutcome::Inserted(InsertOneResult::new(id)),
        None => InsertOutcome::AlreadyExists(AlreadyExists::new("Story already exists")),
    };

    Ok(Json(outcome))
}
