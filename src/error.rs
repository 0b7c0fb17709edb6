// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::services::token::TokenError;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("Authentication required: {0}")]
    Unauthorized(String),

    #[error("Not authorized: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub const INVALID_CREDENTIALS: &'static str = "Invalid credentials.";

    /// Single-message validation error without a field.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError {
            field: None,
            message: message.into(),
        }])
    }
}

/// One entry of a `{errors: [...]}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldError {
                    field: Some(field.to_string()),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}.", field)),
                })
            })
            .collect();
        // HashMap iteration order is unstable
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::Validation(fields)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // The rejection text carries serde internals; log it, don't return it.
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        let message = match rejection {
            JsonRejection::JsonDataError(_) => "Request body has a missing or invalid field.",
            JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON.",
            JsonRejection::MissingJsonContentType(_) => "Expected a JSON request body.",
            _ => "Request body could not be read.",
        };
        AppError::validation(message)
    }
}

/// `{errors: [...]}` body for 400 responses carrying field messages.
#[derive(Serialize)]
struct ErrorsResponse {
    errors: Vec<FieldError>,
}

/// `{message}` body for everything else.
#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorsResponse { errors })).into_response()
            }
            AppError::Conflict(message) => errors_response(message),
            AppError::InvalidCredentials => errors_response(Self::INVALID_CREDENTIALS.to_string()),
            AppError::BadRequest(message) => message_response(StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized(message) | AppError::Forbidden(message) => {
                message_response(StatusCode::UNAUTHORIZED, message)
            }
            AppError::NotFound(message) => message_response(StatusCode::NOT_FOUND, message),
            AppError::Token(err) => {
                tracing::error!(error = %err, "Token error");
                server_error()
            }
            AppError::Upstream(msg) => {
                tracing::error!(error = %msg, "Upstream error");
                server_error()
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                server_error()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                server_error()
            }
        }
    }
}

fn errors_response(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorsResponse {
            errors: vec![FieldError {
                field: None,
                message,
            }],
        }),
    )
        .into_response()
}

fn message_response(status: StatusCode, message: String) -> Response {
    (status, Json(MessageResponse { message })).into_response()
}

fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
