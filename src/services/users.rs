// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User directory: registration, credential checks and lookups.

use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::db::DocumentDb;
use crate::error::{AppError, Result};
use crate::models::{PublicUser, User};

/// Gravatar URL for an email: 200px, PG rating, "mystery person" fallback.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{}?s=200&r=pg&d=mm",
        hex::encode(digest)
    )
}

fn user_exists() -> AppError {
    AppError::Conflict("User already exists.".to_string())
}

#[derive(Clone)]
pub struct UserDirectory {
    db: DocumentDb,
    bcrypt_cost: u32,
}

impl UserDirectory {
    pub fn new(db: DocumentDb, bcrypt_cost: u32) -> Self {
        Self { db, bcrypt_cost }
    }

    /// Create a new account.
    ///
    /// Fails with `Conflict` if the email is already registered. The email is
    /// claimed before hashing, so concurrent sign-ups for one email cannot both
    /// succeed.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        if self.db.find_user_by_email(email).await?.is_some() {
            return Err(user_exists());
        }

        let user_id = uuid::Uuid::new_v4().to_string();
        if !self.db.claim_email(email, &user_id).await? {
            tracing::debug!("Email already claimed by a concurrent registration");
            return Err(user_exists());
        }

        match self.create_claimed(&user_id, name, email, password).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "User registered");
                Ok(user)
            }
            Err(err) => {
                // Free the email so the user can retry.
                if let Err(release_err) = self.db.release_email(email).await {
                    tracing::error!(error = %release_err, "Failed to release email claim");
                }
                Err(err)
            }
        }
    }

    async fn create_claimed(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User> {
        let password = self.hash_password(password).await?;

        let user = User {
            id: user_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password,
            avatar: gravatar_url(email),
            date: Utc::now(),
        };

        self.db.set_user(&user).await?;
        Ok(user)
    }

    /// Check an email/password pair.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .db
            .find_user_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password).await? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Full user record, including the password hash.
    pub async fn get(&self, user_id: &str) -> Result<Option<User>> {
        self.db.get_user(user_id).await
    }

    /// User without the password hash.
    pub async fn find_by_id(&self, user_id: &str) -> Result<PublicUser> {
        self.db
            .get_user(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))
    }

    pub async fn delete(&self, user_id: &str) -> Result<()> {
        self.db.delete_user(user_id).await
    }

    async fn hash_password(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;
        // bcrypt is CPU-bound; keep it off the async workers.
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Hash task failed: {}", e)))?
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Verify task failed: {}", e)))?
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password verify failed: {}", e)))
    }
}
