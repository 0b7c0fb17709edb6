// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token issuing and verification (HS256 JWT).

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT signing secret is not configured")]
    MissingSecret,

    #[error("Invalid or expired token")]
    Invalid,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Issues and verifies signed, time-limited session tokens.
///
/// Stateless: the only inputs are the signing secret and the clock.
#[derive(Clone)]
pub struct TokenService {
    signing_key: Vec<u8>,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(signing_key: Vec<u8>, ttl_secs: u64) -> Self {
        Self {
            signing_key,
            ttl_secs,
        }
    }

    /// Create a token for `user_id`.
    pub fn issue(&self, user_id: &str) -> Result<String, TokenError> {
        if self.signing_key.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| TokenError::Signing(e.to_string()))?
            .as_secs() as usize;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl_secs as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.signing_key),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return the user ID it was issued for.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        if self.signing_key.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let key = DecodingKey::from_secret(&self.signing_key);
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &key, &validation).map_err(|_| TokenError::Invalid)?;

        if token_data.claims.sub.is_empty() {
            return Err(TokenError::Invalid);
        }

        Ok(token_data.claims.sub)
    }
}
