// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Post, like and comment flows through the HTTP API.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use devlink::config::AUTH_HEADER;
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{create_test_app, register, send};

async fn create_post(app: &axum::Router, token: &str, text: &str) -> serde_json::Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/posts",
        Some(token),
        Some(json!({ "text": text })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body
}

#[tokio::test]
async fn test_create_post_snapshots_author() {
    let (app, state) = create_test_app();
    let (token, user_id) = register(&app, &state, "Alice", "alice@example.com").await;

    let post = create_post(&app, &token, "Hello").await;

    assert_eq!(post["text"], "Hello");
    assert_eq!(post["user"], user_id.as_str());
    assert_eq!(post["name"], "Alice");
    assert_eq!(post["likes"], json!([]));
    assert_eq!(post["comments"], json!([]));
}

#[tokio::test]
async fn test_create_post_requires_text() {
    let (app, state) = create_test_app();
    let (token, _) = register(&app, &state, "Alice", "alice@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&token),
        Some(json!({ "text": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["message"], "Text is required.");
}

#[tokio::test]
async fn test_list_newest_first() {
    let (app, state) = create_test_app();
    let (token, _) = register(&app, &state, "Alice", "alice@example.com").await;

    create_post(&app, &token, "first").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    create_post(&app, &token, "second").await;

    let (status, body) = send(&app, Method::GET, "/api/posts", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    let texts: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["second", "first"]);
}

#[tokio::test]
async fn test_get_missing_post() {
    let (app, state) = create_test_app();
    let (token, _) = register(&app, &state, "Alice", "alice@example.com").await;

    let (status, body) = send(&app, Method::GET, "/api/posts/nope", Some(&token), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Post not found.");
}

#[tokio::test]
async fn test_like_twice_then_unlike() {
    let (app, state) = create_test_app();
    let (token, user_id) = register(&app, &state, "Alice", "alice@example.com").await;
    let post = create_post(&app, &token, "Hello").await;
    let id = post["id"].as_str().unwrap();

    let like_uri = format!("/api/posts/like/{id}");
    let (status, body) = send(&app, Method::PUT, &like_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "user": user_id }]));

    let (status, body) = send(&app, Method::PUT, &like_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Post already liked.");

    let unlike_uri = format!("/api/posts/unlike/{id}");
    let (status, body) = send(&app, Method::PUT, &unlike_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, Method::PUT, &unlike_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Post has not yet been liked.");
}

#[tokio::test]
async fn test_only_author_deletes_post() {
    let (app, state) = create_test_app();
    let (alice, _) = register(&app, &state, "Alice", "alice@example.com").await;
    let (bob, _) = register(&app, &state, "Bob", "bob@example.com").await;
    let post = create_post(&app, &alice, "Mine").await;
    let uri = format!("/api/posts/{}", post["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "User not authorized.");

    let (status, _) = send(&app, Method::GET, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK, "post must survive a rejected delete");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post removed.");

    let (status, _) = send(&app, Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comments_add_and_remove() {
    let (app, state) = create_test_app();
    let (alice, _) = register(&app, &state, "Alice", "alice@example.com").await;
    let (bob, bob_id) = register(&app, &state, "Bob", "bob@example.com").await;
    let post = create_post(&app, &alice, "Discuss").await;
    let post_id = post["id"].as_str().unwrap();
    let comment_uri = format!("/api/posts/comment/{post_id}");

    let (status, _) = send(
        &app,
        Method::POST,
        &comment_uri,
        Some(&bob),
        Some(json!({ "text": "one" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, comments) = send(
        &app,
        Method::POST,
        &comment_uri,
        Some(&bob),
        Some(json!({ "text": "two" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let comments = comments.as_array().unwrap().clone();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["text"], "two");
    assert_eq!(comments[0]["user"], bob_id.as_str());
    assert_eq!(comments[0]["name"], "Bob");

    let newest = comments[0]["id"].as_str().unwrap();
    let oldest = comments[1]["id"].as_str().unwrap();

    // Not the comment author
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("{comment_uri}/{oldest}"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Removing the oldest comment must leave the newest one in place
    let (status, remaining) = send(
        &app,
        Method::DELETE,
        &format!("{comment_uri}/{oldest}"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let remaining = remaining.as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], newest);

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("{comment_uri}/{oldest}"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Comment does not exist.");
}

#[tokio::test]
async fn test_comment_on_missing_post() {
    let (app, state) = create_test_app();
    let (token, _) = register(&app, &state, "Alice", "alice@example.com").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/posts/comment/missing",
        Some(&token),
        Some(json!({ "text": "hi" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_bodies_get_errors_shape() {
    let (app, state) = create_test_app();
    let (token, _) = register(&app, &state, "Alice", "alice@example.com").await;

    // Wrong field type
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&token),
        Some(json!({ "text": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["errors"][0]["message"].as_str().unwrap();
    assert!(!message.contains("invalid type"), "serde detail leaked: {message}");

    // Not JSON at all
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/posts")
                .header(AUTH_HEADER, &token)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(common::json_body(response).await["errors"].is_array());

    // No content type
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/posts")
                .header(AUTH_HEADER, &token)
                .body(Body::from(r#"{"text":"hi"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(common::json_body(response).await["errors"].is_array());
}
