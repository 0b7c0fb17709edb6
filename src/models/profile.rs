// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Developer profile model and partial-update merging.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::UserSummary;

/// Developer profile, one per user.
///
/// Stored at: `profiles/{user_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    /// Owning user ID
    pub user: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub githubusername: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub social: Social,
    /// Most recent first
    #[serde(default)]
    pub experience: Vec<Experience>,
    /// Most recent first
    #[serde(default)]
    pub education: Vec<Education>,
    pub date: DateTime<Utc>,
}

/// Social network links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
}

/// Work experience entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    pub from: NaiveDate,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Education entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Fields accepted by a profile upsert.
///
/// Every field is optional. A field overrides the stored value only when it is
/// present and non-empty; absent fields keep the prior value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    /// Comma-separated skill list
    pub skills: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl Profile {
    /// Empty profile for `user_id`.
    pub fn new(user_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: user_id.to_string(),
            user: user_id.to_string(),
            company: None,
            website: None,
            location: None,
            bio: None,
            status: None,
            githubusername: None,
            skills: Vec::new(),
            social: Social::default(),
            experience: Vec::new(),
            education: Vec::new(),
            date: now,
        }
    }

    /// Merge upsert fields into this profile.
    pub fn apply(&mut self, fields: ProfileFields) {
        overwrite(&mut self.company, fields.company);
        overwrite(&mut self.website, fields.website);
        overwrite(&mut self.location, fields.location);
        overwrite(&mut self.bio, fields.bio);
        overwrite(&mut self.status, fields.status);
        overwrite(&mut self.githubusername, fields.githubusername);

        if let Some(skills) = present(fields.skills) {
            self.skills = split_skills(&skills);
        }

        overwrite(&mut self.social.youtube, fields.youtube);
        overwrite(&mut self.social.twitter, fields.twitter);
        overwrite(&mut self.social.facebook, fields.facebook);
        overwrite(&mut self.social.linkedin, fields.linkedin);
        overwrite(&mut self.social.instagram, fields.instagram);
    }

    /// Remove the experience entry with `entry_id`.
    ///
    /// Returns `false` (and leaves the list alone) if no entry matches.
    pub fn remove_experience(&mut self, entry_id: &str) -> bool {
        match self.experience.iter().position(|e| e.id == entry_id) {
            Some(index) => {
                self.experience.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the education entry with `entry_id`.
    ///
    /// Returns `false` (and leaves the list alone) if no entry matches.
    pub fn remove_education(&mut self, entry_id: &str) -> bool {
        match self.education.iter().position(|e| e.id == entry_id) {
            Some(index) => {
                self.education.remove(index);
                true
            }
            None => false,
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn overwrite(slot: &mut Option<String>, value: Option<String>) {
    if let Some(value) = present(value) {
        *slot = Some(value);
    }
}

/// Split a comma-separated skill list, trimming each entry.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

/// Profile joined with its owner's name and avatar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    /// `None` if the owning user record no longer exists
    pub owner: Option<UserSummary>,
}
