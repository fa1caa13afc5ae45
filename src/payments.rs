use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::Config;
use crate::errors::payment::PaymentError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
}

/// Creates payment intents with an external provider.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError>;
}

/// Converts a price in major units to the provider's integer minor units.
pub fn price_to_minor_units(price: f64) -> Result<i64, PaymentError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(PaymentError::InvalidPrice { price });
    }
    let cents = (price * 100.0).round();
    if cents < 1.0 || cents > i64::MAX as f64 {
        return Err(PaymentError::InvalidPrice { price });
    }
    Ok(cents as i64)
}

/// The client sends the price it wants to pay. When a canonical price is
/// configured, anything else is refused.
pub fn check_price(price: f64, fixed_price: Option<f64>) -> Result<i64, PaymentError> {
    let amount = price_to_minor_units(price)?;
    if let Some(expected) = fixed_price {
        if amount != price_to_minor_units(expected)? {
            return Err(PaymentError::PriceMismatch { price, expected });
        }
    }
    Ok(amount)
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StripeClient {
    http_client: Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(api_base: &str, secret_key: &str) -> Result<Self, PaymentError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PaymentError::Transport { details: e.to_string() })?;

        Ok(Self {
            http_client,
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
        })
    }

    /// Builds a client when a secret key is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, PaymentError> {
        match &config.stripe_secret_key {
            Some(key) => Self::new(&config.stripe_api_base, key).map(Some),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let url = format!("{}/v1/payment_intents", self.api_base);
        let amount_param = amount.to_string();
        let params = [
            ("amount", amount_param.as_str()),
            ("currency", currency),
            ("payment_method_types[]", "card"),
        ];

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::Transport { details: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let details = match serde_json::from_str::<StripeErrorBody>(&body) {
                Ok(parsed) => format!(
                    "{}: {}",
                    parsed.error.kind.unwrap_or_else(|| "error".to_string()),
                    parsed.error.message.unwrap_or_default()
                ),
                Err(_) => body,
            };
            return Err(PaymentError::ProviderRejected {
                status: status.as_u16(),
                details,
            });
        }

        response
            .json::<PaymentIntent>()
            .await
            .map_err(|e| PaymentError::MalformedResponse { details: e.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_string_contains, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[test]
    fn price_is_scaled_to_minor_units() {
        assert_eq!(price_to_minor_units(5.0).unwrap(), 500);
        assert_eq!(price_to_minor_units(19.99).unwrap(), 1999);
        // 0.29 * 100.0 is 28.999999999999996
        assert_eq!(price_to_minor_units(0.29).unwrap(), 29);
    }

    #[test]
    fn non_positive_or_non_finite_prices_are_rejected() {
        for price in [0.0, -3.0, f64::NAN, f64::INFINITY, 0.001] {
            assert!(
                matches!(price_to_minor_units(price), Err(PaymentError::InvalidPrice { .. })),
                "price {} should be rejected",
                price
            );
        }
    }

    #[test]
    fn fixed_price_rejects_tampered_amounts() {
        assert_eq!(check_price(5.0, Some(5.0)).unwrap(), 500);
        assert!(matches!(
            check_price(0.5, Some(5.0)),
            Err(PaymentError::PriceMismatch { .. })
        ));
        assert_eq!(check_price(0.5, None).unwrap(), 50);
    }

    #[tokio::test]
    async fn creates_intent_with_form_encoded_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .and(header("authorization", "Bearer sk_test_123"))
            .and(body_string_contains("amount=500"))
            .and(body_string_contains("currency=usd"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "pi_1",
                "object": "payment_intent",
                "client_secret": "pi_1_secret_abc",
                "amount": 500,
                "currency": "usd"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = StripeClient::new(&server.uri(), "sk_test_123").unwrap();
        let intent = client.create_payment_intent(500, "usd").await.unwrap();

        assert_eq!(intent.client_secret, "pi_1_secret_abc");
        assert_eq!(intent.amount, 500);
    }

    #[tokio::test]
    async fn provider_errors_carry_status_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(402).set_body_json(serde_json::json!({
                "error": {"type": "card_error", "message": "Your card was declined."}
            })))
            .mount(&server)
            .await;

        let client = StripeClient::new(&server.uri(), "sk_test_123").unwrap();
        let err = client.create_payment_intent(500, "usd").await.unwrap_err();

        match err {
            PaymentError::ProviderRejected { status, details } => {
                assert_eq!(status, 402);
                assert!(details.contains("card_error"));
                assert!(details.contains("declined"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_success_body_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = StripeClient::new(&server.uri(), "sk_test_123").unwrap();
        let err = client.create_payment_intent(500, "usd").await.unwrap_err();
        assert!(matches!(err, PaymentError::MalformedResponse { .. }));
    }
}
