// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client session state.
//!
//! `reduce` is a pure transition function. `Session` owns the state together
//! with a `TokenStorage` and keeps the persisted token in step with it.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use crate::models::PublicUser;

/// Key the token is persisted under.
pub const TOKEN_KEY: &str = "token";

/// Durable key/value storage for the session token.
pub trait TokenStorage {
    fn load(&self) -> Option<String>;
    fn save(&mut self, token: &str) -> io::Result<()>;
    fn clear(&mut self) -> io::Result<()>;
}

/// Process-local storage; nothing survives a restart.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `token`, as if left over from a previous run.
    pub fn with_token(token: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(TOKEN_KEY.to_string(), token.to_string());
        Self { values }
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.values.get(TOKEN_KEY).cloned()
    }

    fn save(&mut self, token: &str) -> io::Result<()> {
        self.values.insert(TOKEN_KEY.to_string(), token.to_string());
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.values.remove(TOKEN_KEY);
        Ok(())
    }
}

/// JSON file of string keys and values.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> HashMap<String, String> {
        std::fs::read(&self.path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default()
    }

    fn write_all(&self, values: &HashMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(values)?;
        std::fs::write(&self.path, bytes)
    }
}

impl TokenStorage for FileStorage {
    fn load(&self) -> Option<String> {
        self.read_all().remove(TOKEN_KEY)
    }

    fn save(&mut self, token: &str) -> io::Result<()> {
        let mut values = self.read_all();
        values.insert(TOKEN_KEY.to_string(), token.to_string());
        self.write_all(&values)
    }

    fn clear(&mut self) -> io::Result<()> {
        let mut values = self.read_all();
        if values.remove(TOKEN_KEY).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub token: Option<String>,
    /// `None` until the first auth check completes
    pub is_authenticated: Option<bool>,
    pub loading: bool,
    pub user: Option<PublicUser>,
}

impl SessionState {
    /// State at startup, before the stored token has been checked.
    pub fn initial(token: Option<String>) -> Self {
        Self {
            token,
            is_authenticated: None,
            loading: true,
            user: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    UserLoaded(PublicUser),
    RegisterSuccess { token: String },
    LoginSuccess { token: String },
    AuthError,
    RegisterFail,
    LoginFail,
    Logout,
}

/// Apply `action` to `state`.
pub fn reduce(state: SessionState, action: &SessionAction) -> SessionState {
    match action {
        SessionAction::UserLoaded(user) => SessionState {
            is_authenticated: Some(true),
            loading: false,
            user: Some(user.clone()),
            ..state
        },
        SessionAction::RegisterSuccess { token } | SessionAction::LoginSuccess { token } => {
            SessionState {
                token: Some(token.clone()),
                is_authenticated: Some(true),
                loading: false,
                ..state
            }
        }
        SessionAction::AuthError | SessionAction::RegisterFail | SessionAction::LoginFail => {
            SessionState {
                token: None,
                is_authenticated: Some(false),
                loading: false,
                ..state
            }
        }
        SessionAction::Logout => SessionState {
            token: None,
            is_authenticated: Some(false),
            loading: false,
            user: None,
        },
    }
}

/// Session context passed to the client actions.
pub struct Session<S: TokenStorage> {
    state: SessionState,
    storage: S,
}

impl<S: TokenStorage> Session<S> {
    /// Start a session from whatever token `storage` holds.
    pub fn new(storage: S) -> Self {
        let state = SessionState::initial(storage.load());
        Self { state, storage }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Apply `action` and persist or clear the token accordingly.
    pub fn dispatch(&mut self, action: SessionAction) {
        let stored = match &action {
            SessionAction::RegisterSuccess { token } | SessionAction::LoginSuccess { token } => {
                self.storage.save(token)
            }
            SessionAction::UserLoaded(_) => Ok(()),
            _ => self.storage.clear(),
        };
        if let Err(err) = stored {
            tracing::warn!(error = %err, "Failed to persist session token");
        }

        let state = std::mem::replace(&mut self.state, SessionState::initial(None));
        self.state = reduce(state, &action);
    }
}
