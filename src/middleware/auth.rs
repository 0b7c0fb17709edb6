// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token authentication middleware.

use crate::config::AUTH_HEADER;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

pub const NO_TOKEN: &str = "No token was found. Authorization denied.";
pub const INVALID_TOKEN: &str = "Token is not valid. Authorization denied.";

/// Authenticated user extracted from the session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

/// Middleware that requires a valid `x-auth-token` header.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTH_HEADER)
        .ok_or_else(|| AppError::Unauthorized(NO_TOKEN.to_string()))?;

    if header.is_empty() {
        return Err(AppError::Unauthorized(NO_TOKEN.to_string()));
    }
    // A present but unreadable header is a bad token, not a missing one.
    let token = header
        .to_str()
        .map_err(|_| AppError::Unauthorized(INVALID_TOKEN.to_string()))?
        .trim();

    let user_id = state.tokens.verify(token).map_err(|err| {
        tracing::debug!(error = %err, "Rejected session token");
        AppError::Unauthorized(INVALID_TOKEN.to_string())
    })?;

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}
