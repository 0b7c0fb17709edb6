// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration route.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::Result;
use crate::routes::JsonBody;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users", post(register))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Please include a valid email."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Please enter a password with 6 or more characters."))]
    pub password: String,
}

/// Session token returned by registration and login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Register a user and sign them in.
async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<Json<TokenResponse>> {
    body.validate()?;

    let user = state
        .users
        .register(&body.name, &body.email, &body.password)
        .await?;

    let token = state.tokens.issue(&user.id)?;

    Ok(Json(TokenResponse { token }))
}
