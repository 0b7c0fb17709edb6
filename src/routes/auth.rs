// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login and current-user routes.

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::PublicUser;
use crate::routes::users::TokenResponse;
use crate::routes::JsonBody;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth", post(login))
}

/// Routes that need a session; the auth layer is added in routes/mod.rs.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth", get(current_user))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(email(message = "Email is required."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Get the signed-in user.
async fn current_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PublicUser>> {
    Ok(Json(state.users.find_by_id(&user.user_id).await?))
}

/// Check credentials and return a session token.
async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    body.validate()?;

    let user = state.users.authenticate(&body.email, &body.password).await?;
    let token = state.tokens.issue(&user.id)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(TokenResponse { token }))
}
