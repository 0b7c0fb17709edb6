// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile store: upserts, experience/education lists and the delete cascade.

use chrono::Utc;
use futures_util::{stream, StreamExt};

use crate::db::DocumentDb;
use crate::error::{AppError, Result};
use crate::models::{Education, Experience, Profile, ProfileFields, ProfileView, UserSummary};

const MAX_CONCURRENT_DB_OPS: usize = 50;

#[derive(Clone)]
pub struct ProfileStore {
    db: DocumentDb,
}

fn no_profile() -> AppError {
    AppError::NotFound("There is no profile for this user.".to_string())
}

impl ProfileStore {
    pub fn new(db: DocumentDb) -> Self {
        Self { db }
    }

    /// Create the user's profile, or merge `fields` into the existing one.
    pub async fn upsert(&self, user_id: &str, fields: ProfileFields) -> Result<Profile> {
        let existing = self.db.get_profile(user_id).await?;
        let created = existing.is_none();

        let mut profile = existing.unwrap_or_else(|| Profile::new(user_id, Utc::now()));
        profile.apply(fields);

        self.db.set_profile(&profile).await?;

        tracing::info!(user_id, created, "Profile saved");

        Ok(profile)
    }

    pub async fn get_by_user(&self, user_id: &str) -> Result<Profile> {
        self.db.get_profile(user_id).await?.ok_or_else(no_profile)
    }

    /// Join a profile with its owner's name and avatar.
    pub async fn view(&self, profile: Profile) -> Result<ProfileView> {
        let owner = self
            .db
            .get_user(&profile.user)
            .await?
            .map(|user| UserSummary::from(&user));
        Ok(ProfileView { profile, owner })
    }

    /// All profiles, each joined with its owner.
    pub async fn list_all(&self) -> Result<Vec<ProfileView>> {
        let profiles = self.db.list_profiles().await?;

        let mut views = stream::iter(profiles)
            .map(|profile| self.view(profile))
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<ProfileView>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<ProfileView>>>()?;

        // Oldest first for a stable listing
        views.sort_by(|a, b| a.profile.date.cmp(&b.profile.date));
        Ok(views)
    }

    pub async fn add_experience(&self, user_id: &str, entry: Experience) -> Result<Profile> {
        let mut profile = self.get_by_user(user_id).await?;
        profile.experience.insert(0, entry);
        self.db.set_profile(&profile).await?;
        Ok(profile)
    }

    pub async fn add_education(&self, user_id: &str, entry: Education) -> Result<Profile> {
        let mut profile = self.get_by_user(user_id).await?;
        profile.education.insert(0, entry);
        self.db.set_profile(&profile).await?;
        Ok(profile)
    }

    /// Remove one experience entry. An unknown `entry_id` returns the profile unchanged.
    pub async fn remove_experience(&self, user_id: &str, entry_id: &str) -> Result<Profile> {
        let mut profile = self.get_by_user(user_id).await?;
        if profile.remove_experience(entry_id) {
            self.db.set_profile(&profile).await?;
        } else {
            tracing::debug!(user_id, entry_id, "Experience entry not found, nothing removed");
        }
        Ok(profile)
    }

    /// Remove one education entry. An unknown `entry_id` returns the profile unchanged.
    pub async fn remove_education(&self, user_id: &str, entry_id: &str) -> Result<Profile> {
        let mut profile = self.get_by_user(user_id).await?;
        if profile.remove_education(entry_id) {
            self.db.set_profile(&profile).await?;
        } else {
            tracing::debug!(user_id, entry_id, "Education entry not found, nothing removed");
        }
        Ok(profile)
    }

    /// Delete the profile and then the user account.
    ///
    /// Posts written by the user are left in place. The two deletes are not
    /// atomic; a failure in between leaves the user without a profile.
    pub async fn delete_cascade(&self, user_id: &str) -> Result<()> {
        self.db.delete_profile(user_id).await?;
        self.db.delete_user(user_id).await?;

        tracing::info!(user_id, "Profile and user deleted");
        Ok(())
    }
}
