use axum::{extract::State, response::Json, routing::get, Router};
use std::sync::Arc;

use crate::{
    errors::ApiError,
    extract::JsonBody,
    models::{CheckoutTotal, CreateCheckout, InsertOneResult},
    AppState,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(checkout_totals).post(create_checkout))
}

#[utoipa::path(
    get,
    path = "/checkout",
    tag = "checkout",
    responses(
        (status = 200, description = "Single total over all checkouts, or an empty list when there are none", body = Vec<CheckoutTotal>)
    )
)]
pub async fn checkout_totals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CheckoutTotal>>, ApiError> {
    Ok(Json(state.db.checkout_totals().await?))
}

#[utoipa::path(
    post,
    path = "/checkout",
    tag = "checkout",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Insert acknowledgment", body = InsertOneResult),
        (status = 400, description = "Missing or non-numeric amount")
    )
)]
pub async fn create_checkout(
    State(state): State<Arc<AppState>>,
    JsonBody(checkout): JsonBody<CreateCheckout>,
) -> Result<Json<InsertOneResult>, ApiError> {
    let checkout = checkout.into_document()?;
    let id = state.db.create_checkout(checkout).await?;
    Ok(Json(InsertOneResult::new(id)))
}
