use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::{
    db::BiodataFilter,
    errors::ApiError,
    extract::{parse_object_id, JsonBody, PathParam, QueryParams},
    models::{BiodataPayload, BiodataQuery, BiodataWriteOutcome, Document, InsertOneResult},
    AppState,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_biodatas).post(save_biodata))
        .route("/{id}", get(get_biodata))
        .route("/category/{category}", get(list_by_category))
        .route("/user/{id}", get(get_biodata_by_user))
        .route("/checkout/{id}", get(get_biodata_for_checkout))
}

#[utoipa::path(
    get,
    path = "/biodatas",
    tag = "biodatas",
    params(BiodataQuery),
    responses(
        (status = 200, description = "Biodatas matching every given filter, by biodataId", body = Vec<serde_json::Value>),
        (status = 400, description = "Non-numeric age bound or malformed identifier"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_biodatas(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<BiodataQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let filter =
        BiodataFilter::from_query(&query).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let biodatas = state.db.list_biodatas(&filter).await?;
    Ok(Json(biodatas))
}

#[utoipa::path(
    get,
    path = "/biodatas/{id}",
    tag = "biodatas",
    params(
        ("id" = String, Path, description = "Biodata storage ID")
    ),
    responses(
        (status = 200, description = "Biodata document", body = serde_json::Value),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Biodata not found")
    )
)]
pub async fn get_biodata(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
) -> Result<Json<Document>, ApiError> {
    let id = parse_object_id(&id)?;
    let biodata = state
        .db
        .get_biodata(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Biodata"))?;
    Ok(Json(biodata))
}

#[utoipa::path(
    get,
    path = "/biodatas/category/{category}",
    tag = "biodatas",
    params(
        ("category" = String, Path, description = "Biodata type, e.g. Male or Female")
    ),
    responses(
        (status = 200, description = "Up to three biodatas of this type", body = Vec<serde_json::Value>)
    )
)]
pub async fn list_by_category(
    State(state): State<Arc<AppState>>,
    PathParam(category): PathParam<String>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let biodatas = state.db.list_biodatas_by_category(&category).await?;
    Ok(Json(biodatas))
}

#[utoipa::path(
    get,
    path = "/biodatas/user/{id}",
    tag = "biodatas",
    params(
        ("id" = String, Path, description = "Owning user's ID")
    ),
    responses(
        (status = 200, description = "The user's biodata", body = serde_json::Value),
        (status = 404, description = "User has no biodata")
    )
)]
pub async fn get_biodata_by_user(
    State(state): State<Arc<AppState>>,
    PathParam(user_id): PathParam<String>,
) -> Result<Json<Document>, ApiError> {
    let biodata = state
        .db
        .get_biodata_by_user_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Biodata"))?;
    Ok(Json(biodata))
}

#[utoipa::path(
    get,
    path = "/biodatas/checkout/{id}",
    tag = "biodatas",
    params(
        ("id" = i64, Path, description = "Sequential biodataId")
    ),
    responses(
        (status = 200, description = "Biodata being purchased", body = serde_json::Value),
        (status = 400, description = "biodataId is not a number"),
        (status = 404, description = "Biodata not found")
    )
)]
pub async fn get_biodata_for_checkout(
    State(state): State<Arc<AppState>>,
    PathParam(biodata_id): PathParam<String>,
) -> Result<Json<Document>, ApiError> {
    let biodata_id: i64 = biodata_id.trim().parse().map_err(|_| {
        ApiError::bad_request(format!("'{}' is not a valid biodataId", biodata_id))
    })?;
    let biodata = state
        .db
        .get_biodata_by_number(biodata_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Biodata"))?;
    Ok(Json(biodata))
}

#[utoipa::path(
    post,
    path = "/biodatas",
    tag = "biodatas",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Insert acknowledgment with the assigned biodataId, or the merge result when the user already has a biodata", body = InsertOneResult),
        (status = 400, description = "Missing userId or invalid age"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn save_biodata(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<BiodataPayload>,
) -> Result<Json<BiodataWriteOutcome>, ApiError> {
    let (user_id, fields) = payload.into_parts()?;
    let outcome = state.db.upsert_biodata(&user_id, fields).await?;
    Ok(Json(outcome))
}
