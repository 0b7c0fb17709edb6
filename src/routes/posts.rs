// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Post, like and comment routes. All of them need a session.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::{Comment, Like, Post};
use crate::routes::{JsonBody, MessageResponse};
use crate::AppState;

/// The auth layer is added in routes/mod.rs.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/posts", post(create_post).get(list_posts))
        .route("/api/posts/{id}", get(get_post).delete(delete_post))
        .route("/api/posts/like/{id}", put(like_post))
        .route("/api/posts/unlike/{id}", put(unlike_post))
        .route("/api/posts/comment/{id}", post(add_comment))
        .route("/api/posts/comment/{id}/{comment_id}", delete(remove_comment))
}

#[derive(Debug, Deserialize, Validate)]
pub struct TextRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Text is required."))]
    pub text: String,
}

async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(body): JsonBody<TextRequest>,
) -> Result<Json<Post>> {
    body.validate()?;
    Ok(Json(state.posts.create(&user.user_id, &body.text).await?))
}

async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Post>>> {
    Ok(Json(state.posts.list().await?))
}

async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Post>> {
    Ok(Json(state.posts.get_by_id(&id).await?))
}

async fn delete_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.posts.delete(&id, &user.user_id).await?;
    Ok(Json(MessageResponse {
        message: "Post removed.".to_string(),
    }))
}

async fn like_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>> {
    Ok(Json(state.posts.like(&id, &user.user_id).await?))
}

async fn unlike_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>> {
    Ok(Json(state.posts.unlike(&id, &user.user_id).await?))
}

async fn add_comment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<TextRequest>,
) -> Result<Json<Vec<Comment>>> {
    body.validate()?;
    Ok(Json(
        state
            .posts
            .add_comment(&id, &user.user_id, &body.text)
            .await?,
    ))
}

async fn remove_comment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Vec<Comment>>> {
    Ok(Json(
        state
            .posts
            .remove_comment(&id, &comment_id, &user.user_id)
            .await?,
    ))
}
