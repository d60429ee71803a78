//! Authentication and input validation surface tests
//!
//! Requests here are rejected by extractors before any query runs, so a
//! lazy, never-connected pool is enough.

mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::json;

use common::{
    billing_app, content_app, get_request, json_request, lazy_pool, members_app, send,
};

#[tokio::test]
async fn test_member_listing_requires_token() {
    let app = members_app(lazy_pool());

    let (status, json) = send(app, get_request("/v1/users")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], true);
}

#[tokio::test]
async fn test_garbage_bearer_token_is_rejected() {
    let app = members_app(lazy_pool());

    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/v1/users")
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .body(axum::body::Body::empty())
        .expect("request build");
    let (status, _) = send(app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = members_app(lazy_pool());

    let payload = json!({
        "email": "not-an-email",
        "password": "long-enough-password",
        "first_name": "Robin",
        "last_name": "Loxley"
    });
    let (status, json) = send(
        app,
        json_request(Method::POST, "/v1/auth/register", &payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], true);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = members_app(lazy_pool());

    let payload = json!({
        "email": "robin@example.com",
        "password": "short",
        "first_name": "Robin",
        "last_name": "Loxley"
    });
    let (status, _) = send(
        app,
        json_request(Method::POST, "/v1/auth/register", &payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_rejects_missing_fields() {
    let app = members_app(lazy_pool());

    let payload = json!({ "email": "robin@example.com" });
    let (status, json) = send(app, json_request(Method::POST, "/v1/auth/login", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], true);
}

#[tokio::test]
async fn test_plan_creation_requires_token() {
    let app = members_app(lazy_pool());

    let payload = json!({
        "name": "Monthly",
        "price": 20000,
        "benefits": ["Range access"],
        "interval": "monthly",
        "duration_days": 30
    });
    let (status, _) = send(app, json_request(Method::POST, "/v1/plans", &payload)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_walk_in_checkout_rejects_invalid_email() {
    let app = billing_app(lazy_pool());

    let payload = json!({ "email": "nope", "entry_date": "2026-09-01" });
    let (status, _) = send(
        app,
        json_request(Method::POST, "/v1/walk-ins/initialize", &payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_walk_in_listing_requires_token() {
    let app = billing_app(lazy_pool());

    let (status, _) = send(app, get_request("/v1/walk-ins")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_contact_form_rejects_invalid_email() {
    let app = content_app(lazy_pool());

    let payload = json!({
        "email": "nope",
        "first_name": "Robin",
        "last_name": "Loxley",
        "message": "When is the range open?",
        "phone_number": "+2348000000000"
    });
    let (status, _) = send(app, json_request(Method::POST, "/v1/contact", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_team_member_creation_requires_token() {
    let app = content_app(lazy_pool());

    let payload = json!({
        "name": "Robin Loxley",
        "position": "Head Coach",
        "context": "Runs the beginner programme.",
        "image_url": "https://cdn.example.com/robin.jpg"
    });
    let (status, _) = send(app, json_request(Method::POST, "/v1/teams", &payload)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
