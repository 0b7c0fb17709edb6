// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Post store: posts, likes and comments.
//!
//! Every mutation is a fetch-modify-write of a single post document; the last
//! write wins. Two concurrent likes from the same user can both pass the
//! duplicate check.

use chrono::Utc;

use crate::db::DocumentDb;
use crate::error::{AppError, Result};
use crate::models::{Comment, Like, Post, User};

#[derive(Clone)]
pub struct PostStore {
    db: DocumentDb,
}

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found.".to_string())
}

fn not_authorized() -> AppError {
    AppError::Forbidden("User not authorized.".to_string())
}

impl PostStore {
    pub fn new(db: DocumentDb) -> Self {
        Self { db }
    }

    async fn author(&self, user_id: &str) -> Result<User> {
        self.db
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))
    }

    /// Create a post, snapshotting the author's name and avatar.
    pub async fn create(&self, user_id: &str, text: &str) -> Result<Post> {
        if text.trim().is_empty() {
            return Err(AppError::validation("Text is required."));
        }

        let author = self.author(user_id).await?;

        let post = Post {
            id: uuid::Uuid::new_v4().to_string(),
            user: author.id,
            text: text.to_string(),
            name: author.name,
            avatar: author.avatar,
            likes: Vec::new(),
            comments: Vec::new(),
            date: Utc::now(),
        };

        self.db.set_post(&post).await?;

        tracing::info!(post_id = %post.id, user_id, "Post created");

        Ok(post)
    }

    /// All posts, newest first.
    pub async fn list(&self) -> Result<Vec<Post>> {
        let mut posts = self.db.list_posts().await?;
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    pub async fn get_by_id(&self, post_id: &str) -> Result<Post> {
        self.db.get_post(post_id).await?.ok_or_else(post_not_found)
    }

    /// Delete a post. Only its author may do so.
    pub async fn delete(&self, post_id: &str, requester_id: &str) -> Result<()> {
        let post = self.get_by_id(post_id).await?;

        if post.user != requester_id {
            tracing::warn!(post_id, requester_id, "Blocked post deletion by non-author");
            return Err(not_authorized());
        }

        self.db.delete_post(post_id).await?;

        tracing::info!(post_id, "Post deleted");
        Ok(())
    }

    /// Like a post. Returns the updated likes, most recent first.
    pub async fn like(&self, post_id: &str, user_id: &str) -> Result<Vec<Like>> {
        let mut post = self.get_by_id(post_id).await?;

        if !post.add_like(user_id) {
            return Err(AppError::BadRequest("Post already liked.".to_string()));
        }

        self.db.set_post(&post).await?;
        Ok(post.likes)
    }

    /// Withdraw a like. Returns the updated likes.
    pub async fn unlike(&self, post_id: &str, user_id: &str) -> Result<Vec<Like>> {
        let mut post = self.get_by_id(post_id).await?;

        if !post.remove_like(user_id) {
            return Err(AppError::BadRequest(
                "Post has not yet been liked.".to_string(),
            ));
        }

        self.db.set_post(&post).await?;
        Ok(post.likes)
    }

    /// Add a comment at the front. Returns the updated comments.
    pub async fn add_comment(&self, post_id: &str, user_id: &str, text: &str) -> Result<Vec<Comment>> {
        if text.trim().is_empty() {
            return Err(AppError::validation("Text is required."));
        }

        let author = self.author(user_id).await?;
        let mut post = self.get_by_id(post_id).await?;

        post.comments.insert(
            0,
            Comment {
                id: uuid::Uuid::new_v4().to_string(),
                user: author.id,
                text: text.to_string(),
                name: author.name,
                avatar: author.avatar,
                date: Utc::now(),
            },
        );

        self.db.set_post(&post).await?;
        Ok(post.comments)
    }

    /// Remove exactly the comment `comment_id`, which the requester must have written.
    pub async fn remove_comment(
        &self,
        post_id: &str,
        comment_id: &str,
        requester_id: &str,
    ) -> Result<Vec<Comment>> {
        let mut post = self.get_by_id(post_id).await?;

        let index = post
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or_else(|| AppError::BadRequest("Comment does not exist.".to_string()))?;

        if post.comments[index].user != requester_id {
            tracing::warn!(post_id, comment_id, requester_id, "Blocked comment removal by non-author");
            return Err(not_authorized());
        }

        post.comments.remove(index);

        self.db.set_post(&post).await?;
        Ok(post.comments)
    }
}
