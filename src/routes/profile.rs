// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile routes.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, FieldError, Result};
use crate::middleware::AuthUser;
use crate::models::{Education, Experience, Profile, ProfileFields, ProfileView};
use crate::routes::{JsonBody, MessageResponse};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile", get(list_profiles))
        .route("/api/profile/user/{user_id}", get(get_profile_by_user))
        .route("/api/profile/github/{username}", get(github_repos))
}

/// Routes that need a session; the auth layer is added in routes/mod.rs.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile/me", get(get_my_profile))
        .route("/api/profile", post(upsert_profile).delete(delete_account))
        .route("/api/profile/experience", put(add_experience))
        .route("/api/profile/experience/{exp_id}", delete(remove_experience))
        .route("/api/profile/education", put(add_education))
        .route("/api/profile/education/{edu_id}", delete(remove_education))
}

// ─── Profile ─────────────────────────────────────────────────

/// Status and skills are required on every upsert.
fn validate_profile(fields: &ProfileFields) -> Result<()> {
    let mut errors = Vec::new();
    if fields.status.as_deref().map_or(true, |s| s.trim().is_empty()) {
        errors.push(FieldError {
            field: Some("status".to_string()),
            message: "Status is required.".to_string(),
        });
    }
    if fields.skills.as_deref().map_or(true, |s| s.trim().is_empty()) {
        errors.push(FieldError {
            field: Some("skills".to_string()),
            message: "Skills is required.".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

async fn get_my_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileView>> {
    let profile = state.profiles.get_by_user(&user.user_id).await?;
    Ok(Json(state.profiles.view(profile).await?))
}

async fn upsert_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(fields): JsonBody<ProfileFields>,
) -> Result<Json<Profile>> {
    validate_profile(&fields)?;
    Ok(Json(state.profiles.upsert(&user.user_id, fields).await?))
}

async fn list_profiles(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ProfileView>>> {
    Ok(Json(state.profiles.list_all().await?))
}

async fn get_profile_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileView>> {
    let profile = state.profiles.get_by_user(&user_id).await.map_err(|err| match err {
        AppError::NotFound(_) => AppError::NotFound("Profile not found.".to_string()),
        other => other,
    })?;
    Ok(Json(state.profiles.view(profile).await?))
}

/// Delete the profile and the account. Posts are kept.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MessageResponse>> {
    state.profiles.delete_cascade(&user.user_id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted.".to_string(),
    }))
}

// ─── Experience ──────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct ExperienceRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Company is required."))]
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[validate(required(message = "From date is required."))]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl ExperienceRequest {
    fn into_entry(self) -> Result<Experience> {
        self.validate()?;
        let from = self
            .from
            .ok_or_else(|| AppError::validation("From date is required."))?;
        Ok(Experience {
            id: uuid::Uuid::new_v4().to_string(),
            title: self.title,
            company: self.company,
            location: self.location,
            from,
            to: self.to,
            current: self.current,
            description: self.description,
        })
    }
}

async fn add_experience(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(body): JsonBody<ExperienceRequest>,
) -> Result<Json<Profile>> {
    let entry = body.into_entry()?;
    Ok(Json(state.profiles.add_experience(&user.user_id, entry).await?))
}

async fn remove_experience(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(exp_id): Path<String>,
) -> Result<Json<Profile>> {
    Ok(Json(
        state.profiles.remove_experience(&user.user_id, &exp_id).await?,
    ))
}

// ─── Education ───────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct EducationRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "School is required."))]
    pub school: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Degree is required."))]
    pub degree: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Field of study is required."))]
    pub fieldofstudy: String,
    #[validate(required(message = "From date is required."))]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl EducationRequest {
    fn into_entry(self) -> Result<Education> {
        self.validate()?;
        let from = self
            .from
            .ok_or_else(|| AppError::validation("From date is required."))?;
        Ok(Education {
            id: uuid::Uuid::new_v4().to_string(),
            school: self.school,
            degree: self.degree,
            fieldofstudy: self.fieldofstudy,
            from,
            to: self.to,
            current: self.current,
            description: self.description,
        })
    }
}

async fn add_education(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(body): JsonBody<EducationRequest>,
) -> Result<Json<Profile>> {
    let entry = body.into_entry()?;
    Ok(Json(state.profiles.add_education(&user.user_id, entry).await?))
}

async fn remove_education(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(edu_id): Path<String>,
) -> Result<Json<Profile>> {
    Ok(Json(
        state.profiles.remove_education(&user.user_id, &edu_id).await?,
    ))
}

// ─── GitHub ──────────────────────────────────────────────────

async fn github_repos(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<serde_json::Value>> {
    Ok(Json(state.github.recent_repos(&username).await?))
}
