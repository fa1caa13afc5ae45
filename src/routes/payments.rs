use axum::{extract::State, response::Json, routing::post, Router};
use std::sync::Arc;
use tracing::info;

use crate::{
    errors::payment::PaymentError,
    extract::JsonBody,
    models::{CreatePaymentIntent, PaymentIntentResponse},
    payments::check_price,
    AppState,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/create-payment-intent", post(create_payment_intent))
}

#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "payments",
    request_body = CreatePaymentIntent,
    responses(
        (status = 200, description = "Client secret for the new payment intent", body = PaymentIntentResponse),
        (status = 400, description = "Invalid or unexpected price"),
        (status = 502, description = "Payment provider rejected the request"),
        (status = 503, description = "Payments are not configured")
    )
)]
pub async fn create_payment_intent(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreatePaymentIntent>,
) -> Result<Json<PaymentIntentResponse>, PaymentError> {
    let provider = state.payments.as_ref().ok_or(PaymentError::NotConfigured)?;

    let amount = check_price(request.price, state.config.payment_fixed_price)?;
    let intent = provider
        .create_payment_intent(amount, &state.config.payment_currency)
        .await?;

    info!(
        "Created payment intent {} for {} {}",
        intent.id, intent.amount, intent.currency
    );

    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}
