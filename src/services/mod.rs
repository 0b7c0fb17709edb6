// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod github;
pub mod posts;
pub mod profiles;
pub mod token;
pub mod users;

pub use github::GithubClient;
pub use posts::PostStore;
pub use profiles::ProfileStore;
pub use token::{TokenError, TokenService};
pub use users::UserDirectory;
