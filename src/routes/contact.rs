use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::{
    errors::ApiError,
    extract::{parse_object_id, JsonBody, PathParam},
    models::{CreateContactRequest, DeleteResult, Document, InsertOneResult, UpdateResult},
    AppState,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_contact_requests).post(create_contact_request))
        .route(
            "/{id}",
            get(list_contact_requests_by_email)
                .patch(approve_contact_request)
                .delete(delete_contact_request),
        )
}

#[utoipa::path(
    get,
    path = "/contact",
    tag = "contact",
    responses(
        (status = 200, description = "All contact requests", body = Vec<serde_json::Value>)
    )
)]
pub async fn list_contact_requests(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.db.get_contact_requests().await?))
}

#[utoipa::path(
    get,
    path = "/contact/{email}",
    tag = "contact",
    params(
        ("email" = String, Path, description = "Requester email")
    ),
    responses(
        (status = 200, description = "Contact requests made by this user", body = Vec<serde_json::Value>)
    )
)]
pub async fn list_contact_requests_by_email(
    State(state): State<Arc<AppState>>,
    PathParam(email): PathParam<String>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.db.get_contact_requests_by_email(&email).await?))
}

#[utoipa::path(
    post,
    path = "/contact",
    tag = "contact",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Insert acknowledgment", body = InsertOneResult),
        (status = 400, description = "Missing or invalid email")
    )
)]
pub async fn create_contact_request(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreateContactRequest>,
) -> Result<Json<InsertOneResult>, ApiError> {
    let request = request.into_document()?;
    let id = state.db.create_contact_request(request).await?;
    Ok(Json(InsertOneResult::new(id)))
}

#[utoipa::path(
    patch,
    path = "/contact/{id}",
    tag = "contact",
    params(
        ("id" = String, Path, description = "Contact request ID")
    ),
    responses(
        (status = 200, description = "Update result", body = UpdateResult),
        (status = 400, description = "Invalid ID")
    )
)]
pub async fn approve_contact_request(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
) -> Result<Json<UpdateResult>, ApiError> {
    let id = parse_object_id(&id)?;
    let result = state.db.approve_contact_request(id).await?;
    if result.modified_count > 0 {
        tracing::info!("Contact request {} approved", id);
    }
    Ok(Json(result))
}

#[utoipa::path(
    delete,
    path = "/contact/{id}",
    tag = "contact",
    params(
        ("id" = String, Path, description = "Contact request ID")
    ),
    responses(
        (status = 200, description = "Delete result", body = DeleteResult),
        (status = 400, description = "Invalid ID")
    )
)]
pub async fn delete_contact_request(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
) -> Result<Json<DeleteResult>, ApiError> {
    let id = parse_object_id(&id)?;
    Ok(Json(state.db.delete_contact_request(id).await?))
}
