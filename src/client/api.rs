// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the devlink API.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::ClientError;
use crate::config::AUTH_HEADER;
use crate::error::FieldError;
use crate::models::{Like, Post, PublicUser};

/// Thin wrapper over `reqwest::Client` that knows the API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct TokenBody {
    token: String,
}

/// Error bodies come in two shapes: `{errors: [{message}]}` or `{message}`.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<FieldError>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match token {
            Some(token) => builder.header(AUTH_HEADER, token),
            None => builder,
        }
    }

    /// Turn a non-2xx response into `ClientError::Api`, collecting its messages.
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let messages = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) if !body.errors.is_empty() => {
                body.errors.into_iter().map(|e| e.message).collect()
            }
            Ok(ErrorBody {
                message: Some(message),
                ..
            }) => vec![message],
            _ if text.is_empty() => vec![],
            _ => vec![text],
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            messages,
        })
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = Self::check(builder.send().await?).await?;
        Ok(response.json().await?)
    }

    /// `POST /api/users`; returns the new session token.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        let body = json!({ "name": name, "email": email, "password": password });
        let reply: TokenBody = self
            .send(self.request(Method::POST, "/api/users", None).json(&body))
            .await?;
        Ok(reply.token)
    }

    /// `POST /api/auth`; returns the session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let reply: TokenBody = self
            .send(
                self.request(Method::POST, "/api/auth", None)
                    .json(&Credentials { email, password }),
            )
            .await?;
        Ok(reply.token)
    }

    /// `GET /api/auth`
    pub async fn current_user(&self, token: Option<&str>) -> Result<PublicUser, ClientError> {
        self.send(self.request(Method::GET, "/api/auth", token)).await
    }

    pub async fn create_post(&self, token: &str, text: &str) -> Result<Post, ClientError> {
        self.send(
            self.request(Method::POST, "/api/posts", Some(token))
                .json(&json!({ "text": text })),
        )
        .await
    }

    pub async fn posts(&self, token: &str) -> Result<Vec<Post>, ClientError> {
        self.send(self.request(Method::GET, "/api/posts", Some(token)))
            .await
    }

    pub async fn like_post(&self, token: &str, post_id: &str) -> Result<Vec<Like>, ClientError> {
        let path = format!("/api/posts/like/{}", urlencoding::encode(post_id));
        self.send(self.request(Method::PUT, &path, Some(token))).await
    }
}
