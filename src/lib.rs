// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! devlink: a developer-profile social network.
//!
//! This crate provides the backend API (accounts, token auth, profiles and
//! posts with likes and comments) over a document store, plus a client
//! library that keeps a signed-in session for talking to it.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::DocumentDb;
use services::{GithubClient, PostStore, ProfileStore, TokenService, UserDirectory};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: DocumentDb,
    pub tokens: TokenService,
    pub users: UserDirectory,
    pub profiles: ProfileStore,
    pub posts: PostStore,
    pub github: GithubClient,
}

impl AppState {
    /// Wire up all services over `db`.
    pub fn new(config: Config, db: DocumentDb) -> Self {
        let tokens = TokenService::new(config.jwt_signing_key.clone(), config.token_ttl_secs);
        let users = UserDirectory::new(db.clone(), config.bcrypt_cost);
        let profiles = ProfileStore::new(db.clone());
        let posts = PostStore::new(db.clone());
        let github = GithubClient::new(config.github_api_url.clone(), config.github_token.clone());

        Self {
            config,
            db,
            tokens,
            users,
            profiles,
            posts,
            github,
        }
    }
}
