//! Application configuration loaded from environment variables.
//!
//! Values are read once at startup and are read-only afterwards.

use std::env;

/// Default session token lifetime (seconds).
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 360_000;
/// Default bcrypt work factor for password hashes.
pub const DEFAULT_BCRYPT_COST: u32 = 10;
/// Header carrying the session token on protected requests.
pub const AUTH_HEADER: &str = "x-auth-token";

/// Which document store backs the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Firestore,
    Memory,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Document store backend
    pub storage: StorageBackend,
    /// Server port
    pub port: u16,
    /// Session token lifetime in seconds
    pub token_ttl_secs: u64,
    /// bcrypt cost factor
    pub bcrypt_cost: u32,
    /// Base URL of the GitHub REST API
    pub github_api_url: String,

    // --- Secrets ---
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Optional GitHub token to raise the proxy's rate limit
    pub github_token: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            storage: StorageBackend::Memory,
            port: 8080,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            // bcrypt's minimum cost keeps tests fast
            bcrypt_cost: 4,
            github_api_url: "https://api.github.com".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            github_token: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let storage = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "firestore".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "firestore" => StorageBackend::Firestore,
            "memory" => StorageBackend::Memory,
            _ => return Err(ConfigError::Invalid("STORAGE_BACKEND")),
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            storage,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            token_ttl_secs: parse_or("TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?,
            bcrypt_cost: parse_or("BCRYPT_COST", DEFAULT_BCRYPT_COST)?,
            github_api_url: env::var("GITHUB_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://api.github.com".to_string()),

            jwt_signing_key: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET"))?
                .into_bytes(),
            github_token: env::var("GITHUB_TOKEN")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
