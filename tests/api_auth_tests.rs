// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API authentication and CORS tests.
//!
//! These tests verify that:
//! 1. Protected routes reject requests without valid tokens
//! 2. Registration and login hand out tokens the auth gate accepts
//! 3. CORS preflight requests return correct headers

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use devlink::config::{Config, AUTH_HEADER};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

mod common;
use common::{create_test_app, register, send};

/// Create a JWT with the given offsets (seconds) from now.
fn create_test_jwt(user_id: &str, signing_key: &[u8], iat_offset: i64, exp_offset: i64) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: i64,
        iat: i64,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + exp_offset,
        iat: now + iat_offset,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let (app, _) = create_test_app();

    let (status, body) = send(&app, Method::GET, "/api/auth", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token was found. Authorization denied.");
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let (app, _) = create_test_app();

    let (status, body) = send(&app, Method::GET, "/api/posts", Some("not-a-jwt"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token is not valid. Authorization denied.");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let (app, _) = create_test_app();
    let key = Config::default().jwt_signing_key;
    let token = create_test_jwt("someone", &key, -7200, -3600);

    let (status, _) = send(&app, Method::GET, "/api/auth", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_key_rejected() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("someone", b"another_key_that_is_long_enough!", 0, 3600);

    let (status, _) = send(&app, Method::GET, "/api/auth", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_then_current_user() {
    let (app, state) = create_test_app();
    let (token, user_id) = register(&app, &state, "Alice", "alice@example.com").await;

    let (status, body) = send(&app, Method::GET, "/api/auth", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user_id.as_str());
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body.get("password").is_none(), "password hash leaked");
    assert!(body["avatar"]
        .as_str()
        .unwrap()
        .starts_with("https://www.gravatar.com/avatar/"));
}

#[tokio::test]
async fn test_valid_token_for_deleted_user() {
    let (app, state) = create_test_app();
    let (token, user_id) = register(&app, &state, "Gone", "gone@example.com").await;
    state.users.delete(&user_id).await.unwrap();

    let (status, body) = send(&app, Method::GET, "/api/auth", Some(&token), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found.");
}

#[tokio::test]
async fn test_duplicate_registration() {
    let (app, state) = create_test_app();
    register(&app, &state, "Alice", "alice@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "name": "Alice 2", "email": "alice@example.com", "password": "secret1" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["message"], "User already exists.");
}

#[tokio::test]
async fn test_registration_validation_errors() {
    let (app, _) = create_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "name": "", "email": "nope", "password": "123" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().all(|e| e["message"].is_string()));
}

#[tokio::test]
async fn test_login() {
    let (app, state) = create_test_app();
    let (_, user_id) = register(&app, &state, "Alice", "alice@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth",
        None,
        Some(json!({ "email": "alice@example.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();
    assert_eq!(state.tokens.verify(token).unwrap(), user_id);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth",
        None,
        Some(json!({ "email": "alice@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["message"], "Invalid credentials.");
}

#[tokio::test]
async fn test_login_unknown_email_same_message() {
    let (app, _) = create_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "secret1" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["message"], "Invalid credentials.");
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = create_test_app();

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_security_headers_present() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(common::request(Method::GET, "/health", None, None))
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
}

#[tokio::test]
async fn test_cors_preflight_allows_auth_header() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/posts")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, AUTH_HEADER)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(allowed.contains(AUTH_HEADER));
}

#[tokio::test]
async fn test_cors_rejects_unknown_origin() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/posts")
                .header(header::ORIGIN, "https://evil.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_non_ascii_token_is_invalid_not_missing() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/auth")
                .header(
                    AUTH_HEADER,
                    axum::http::HeaderValue::from_bytes(b"tok\xe9n").unwrap(),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::json_body(response).await;
    assert_eq!(body["message"], "Token is not valid. Authorization denied.");
}
