// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Post model with likes and comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post stored in the document store.
///
/// Author name and avatar are snapshots taken when the post is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post ID (also used as document ID)
    pub id: String,
    /// Author user ID
    pub user: String,
    pub text: String,
    pub name: String,
    pub avatar: String,
    /// Users who liked the post, most recent first; each user at most once
    #[serde(default)]
    pub likes: Vec<Like>,
    /// Most recent first
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    /// Author user ID
    pub user: String,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl Post {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|like| like.user == user_id)
    }

    /// Add a like from `user_id` at the front.
    ///
    /// Returns `false` if the user already liked the post.
    pub fn add_like(&mut self, user_id: &str) -> bool {
        if self.is_liked_by(user_id) {
            return false;
        }
        self.likes.insert(
            0,
            Like {
                user: user_id.to_string(),
            },
        );
        true
    }

    /// Remove the like from `user_id`.
    ///
    /// Returns `false` if the user had not liked the post.
    pub fn remove_like(&mut self, user_id: &str) -> bool {
        match self.likes.iter().position(|like| like.user == user_id) {
            Some(index) => {
                self.likes.remove(index);
                true
            }
            None => false,
        }
    }
}
