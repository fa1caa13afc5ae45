use crate::test_utils::{FakePaymentProvider, TestConfigBuilder, TestContext};
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn client_secret_is_returned_for_valid_price() {
    let provider = Arc::new(FakePaymentProvider::new());
    let ctx = TestContext::with_config(TestConfigBuilder::default().with_payments(provider.clone())).await;

    let (status, body) = ctx.post("/create-payment-intent", json!({"price": 5})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"clientSecret": "pi_test_500_secret"}));
    assert_eq!(provider.calls(), vec![(500, "usd".to_string())]);

    ctx.cleanup_and_close().await;
}

#[tokio::test]
async fn invalid_prices_never_reach_the_provider() {
    let provider = Arc::new(FakePaymentProvider::new());
    let ctx = TestContext::with_config(TestConfigBuilder::default().with_payments(provider.clone())).await;

    for price in [json!(0), json!(-5), json!("five")] {
        let (status, _) = ctx.post("/create-payment-intent", json!({"price": price})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "price {}", price);
    }
    assert!(provider.calls().is_empty());

    ctx.cleanup_and_close().await;
}

#[tokio::test]
async fn fixed_price_rejects_other_amounts() {
    let provider = Arc::new(FakePaymentProvider::new());
    let ctx = TestContext::with_config(
        TestConfigBuilder::default()
            .with_payments(provider.clone())
            .with_fixed_price(5.0),
    )
    .await;

    let (status, body) = ctx.post("/create-payment-intent", json!({"price": 0.5})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("PAYMENT_PRICE_MISMATCH"));

    let (status, _) = ctx.post("/create-payment-intent", json!({"price": 5.0})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(provider.calls().len(), 1);

    ctx.cleanup_and_close().await;
}

#[tokio::test]
async fn missing_provider_is_service_unavailable() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.post("/create-payment-intent", json!({"price": 5})).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], json!("PAYMENT_NOT_CONFIGURED"));

    ctx.cleanup_and_close().await;
}

#[tokio::test]
async fn provider_rejection_is_bad_gateway() {
    let provider = Arc::new(FakePaymentProvider::rejecting(402));
    let ctx = TestContext::with_config(TestConfigBuilder::default().with_payments(provider)).await;

    let (status, body) = ctx.post("/create-payment-intent", json!({"price": 5})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], json!("PAYMENT_PROVIDER_REJECTED"));

    ctx.cleanup_and_close().await;
}
