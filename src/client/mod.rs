// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client library: session state, token persistence, alerts and the API calls
//! that drive them.

pub mod actions;
pub mod alert;
pub mod api;
pub mod session;

pub use actions::{load_user, login, logout, register};
pub use alert::{Alert, AlertKind, AlertQueue};
pub use api::ApiClient;
pub use session::{
    reduce, FileStorage, MemoryStorage, Session, SessionAction, SessionState, TokenStorage,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {}", .messages.join("; "))]
    Api { status: u16, messages: Vec<String> },
}
