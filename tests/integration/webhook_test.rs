//! Paystack webhook gate tests
//!
//! Every rejected delivery is turned away before any repository access,
//! so these run without a database connection.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use longbow_paystack::signature::sign_body;

use common::{billing_app, lazy_pool, send, PAYSTACK_IP, TEST_WEBHOOK_SECRET};

fn webhook_request(ip: Option<&str>, signature: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/v1/payments/webhook")
        .header("content-type", "application/json");
    if let Some(ip) = ip {
        builder = builder.header("x-forwarded-for", ip);
    }
    if let Some(signature) = signature {
        builder = builder.header("x-paystack-signature", signature);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request build")
}

#[tokio::test]
async fn test_delivery_without_origin_header_is_forbidden() {
    let app = billing_app(lazy_pool());
    let body = r#"{"event":"charge.success","data":{}}"#;
    let signature = sign_body(TEST_WEBHOOK_SECRET, body.as_bytes());

    let (status, json) = send(app, webhook_request(None, Some(&signature), body)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], true);
}

#[tokio::test]
async fn test_delivery_from_unknown_address_is_forbidden() {
    let app = billing_app(lazy_pool());
    let body = r#"{"event":"charge.success","data":{}}"#;
    let signature = sign_body(TEST_WEBHOOK_SECRET, body.as_bytes());

    let (status, json) = send(
        app,
        webhook_request(Some("203.0.113.9"), Some(&signature), body),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], true);
}

#[tokio::test]
async fn test_missing_signature_is_rejected() {
    let app = billing_app(lazy_pool());
    let body = r#"{"event":"charge.success","data":{}}"#;

    let (status, json) = send(app, webhook_request(Some(PAYSTACK_IP), None, body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], true);
    assert_eq!(json["message"], "Signature missing");
}

#[tokio::test]
async fn test_signature_from_wrong_secret_is_rejected() {
    let app = billing_app(lazy_pool());
    let body = r#"{"event":"charge.success","data":{}}"#;
    let signature = sign_body("sk_live_other_account", body.as_bytes());

    let (status, json) = send(
        app,
        webhook_request(Some(PAYSTACK_IP), Some(&signature), body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid signature");
}

#[tokio::test]
async fn test_unhandled_event_is_acknowledged() {
    let app = billing_app(lazy_pool());
    let body = r#"{"event":"transfer.success","data":{"amount":5000}}"#;
    let signature = sign_body(TEST_WEBHOOK_SECRET, body.as_bytes());

    let (status, json) = send(
        app,
        webhook_request(Some(PAYSTACK_IP), Some(&signature), body),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["error"], false);
    assert_eq!(json["message"], "purposely unhandled");
}

#[tokio::test]
async fn test_malformed_payload_is_rejected() {
    let app = billing_app(lazy_pool());
    let body = "this is not json";
    let signature = sign_body(TEST_WEBHOOK_SECRET, body.as_bytes());

    let (status, json) = send(
        app,
        webhook_request(Some(PAYSTACK_IP), Some(&signature), body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], true);
}

#[tokio::test]
async fn test_proxy_chain_trusts_rightmost_forwarded_address() {
    let app = billing_app(lazy_pool());
    let body = r#"{"event":"transfer.success","data":{}}"#;
    let signature = sign_body(TEST_WEBHOOK_SECRET, body.as_bytes());

    // Client-sent entries first, the address our proxy appended last.
    let forwarded = format!("198.51.100.4, {PAYSTACK_IP}");
    let (status, _) = send(
        app,
        webhook_request(Some(&forwarded), Some(&signature), body),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_forged_forwarded_prefix_is_forbidden() {
    let app = billing_app(lazy_pool());
    let body = r#"{"event":"charge.success","data":{}}"#;
    let signature = sign_body(TEST_WEBHOOK_SECRET, body.as_bytes());

    // An attacker prepends Paystack's address, but the proxy appends
    // the real origin as the final entry.
    let forwarded = format!("{PAYSTACK_IP}, 203.0.113.9");
    let (status, json) = send(
        app,
        webhook_request(Some(&forwarded), Some(&signature), body),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], true);
}
