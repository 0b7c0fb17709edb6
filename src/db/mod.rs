//! Document store layer (Firestore, or in-memory for tests and local runs).
//!
//! Provides typed operations for:
//! - Users (accounts, looked up by id or email)
//! - Profiles (one per user, keyed by user id)
//! - Posts (with embedded likes and comments)

pub mod firestore;
pub mod memory;

use crate::error::AppError;
use crate::models::{Post, Profile, User};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// One document per registered email, keyed by its SHA-256
    pub const USER_EMAILS: &str = "user_emails";
    /// Profile documents keyed by owning user id
    pub const PROFILES: &str = "profiles";
    pub const POSTS: &str = "posts";
}

/// Marks an email as taken by `user`.
#[derive(Debug, Serialize, Deserialize)]
struct EmailClaim {
    email: String,
    user: String,
}

/// Emails can hold characters Firestore rejects in document IDs.
fn email_key(email: &str) -> String {
    hex::encode(Sha256::digest(email.as_bytes()))
}

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreStore),
    Memory(Arc<MemoryStore>),
}

/// Handle to the document store. Cheap to clone.
#[derive(Clone)]
pub struct DocumentDb {
    backend: Backend,
}

impl DocumentDb {
    /// Connect to Firestore.
    pub async fn firestore(project_id: &str) -> Result<Self, AppError> {
        Ok(Self {
            backend: Backend::Firestore(FirestoreStore::connect(project_id).await?),
        })
    }

    /// Create an empty in-memory store.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(MemoryStore::new())),
        }
    }

    // ─── Generic Document Operations ─────────────────────────────

    async fn get<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(store) => store.get(collection, id).await,
            Backend::Memory(store) => store.get(collection, id),
        }
    }

    async fn set<T>(&self, collection: &str, id: &str, doc: &T) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(store) => store.set(collection, id, doc).await,
            Backend::Memory(store) => store.set(collection, id, doc),
        }
    }

    async fn create<T>(&self, collection: &str, id: &str, doc: &T) -> Result<bool, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(store) => store.create(collection, id, doc).await,
            Backend::Memory(store) => store.create(collection, id, doc),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.delete(collection, id).await,
            Backend::Memory(store) => store.delete(collection, id),
        }
    }

    async fn list<T>(&self, collection: &str) -> Result<Vec<T>, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(store) => store.list(collection).await,
            Backend::Memory(store) => store.list(collection),
        }
    }

    async fn find_by_field<T>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<T>, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(store) => store.find_by_field(collection, field, value).await,
            Backend::Memory(store) => store.find_by_field(collection, field, value),
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get(collections::USERS, user_id).await
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users: Vec<User> = self
            .find_by_field(collections::USERS, "email", email)
            .await?;
        Ok(users.into_iter().next())
    }

    pub async fn set_user(&self, user: &User) -> Result<(), AppError> {
        self.set(collections::USERS, &user.id, user).await
    }

    /// Delete a user and free their email for reuse.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), AppError> {
        if let Some(user) = self.get_user(user_id).await? {
            self.release_email(&user.email).await?;
        }
        self.delete(collections::USERS, user_id).await
    }

    /// Atomically claim `email` for `user_id`. Returns `false` if it is taken.
    pub async fn claim_email(&self, email: &str, user_id: &str) -> Result<bool, AppError> {
        let claim = EmailClaim {
            email: email.to_string(),
            user: user_id.to_string(),
        };
        self.create(collections::USER_EMAILS, &email_key(email), &claim)
            .await
    }

    pub async fn release_email(&self, email: &str) -> Result<(), AppError> {
        self.delete(collections::USER_EMAILS, &email_key(email)).await
    }

    // ─── Profile Operations ──────────────────────────────────────

    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        self.get(collections::PROFILES, user_id).await
    }

    pub async fn set_profile(&self, profile: &Profile) -> Result<(), AppError> {
        self.set(collections::PROFILES, &profile.user, profile).await
    }

    pub async fn delete_profile(&self, user_id: &str) -> Result<(), AppError> {
        self.delete(collections::PROFILES, user_id).await
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        self.list(collections::PROFILES).await
    }

    // ─── Post Operations ─────────────────────────────────────────

    pub async fn get_post(&self, post_id: &str) -> Result<Option<Post>, AppError> {
        self.get(collections::POSTS, post_id).await
    }

    pub async fn set_post(&self, post: &Post) -> Result<(), AppError> {
        self.set(collections::POSTS, &post.id, post).await
    }

    pub async fn delete_post(&self, post_id: &str) -> Result<(), AppError> {
        self.delete(collections::POSTS, post_id).await
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        self.list(collections::POSTS).await
    }
}
