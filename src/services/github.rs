// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitHub API client for listing a user's recent public repositories.

use crate::error::AppError;

const USER_AGENT: &str = concat!("devlink/", env!("CARGO_PKG_VERSION"));

/// GitHub API client.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    fn repos_url(&self, username: &str) -> String {
        format!(
            "{}/users/{}/repos?per_page=5&sort=created&direction=asc",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(username)
        )
    }

    /// Up to five public repos of `username`, oldest first, as returned by GitHub.
    pub async fn recent_repos(&self, username: &str) -> Result<serde_json::Value, AppError> {
        let mut request = self
            .http
            .get(self.repos_url(username))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("GitHub request failed: {}", e)))?;

        if !response.status().is_success() {
            tracing::debug!(username, status = %response.status(), "GitHub lookup failed");
            return Err(AppError::NotFound("No GitHub profile found.".to_string()));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid GitHub response: {}", e)))
    }
}
