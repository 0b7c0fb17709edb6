// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session actions: call the API, then dispatch the outcome.

use super::alert::{AlertKind, AlertQueue, DEFAULT_ALERT_TIMEOUT};
use super::api::ApiClient;
use super::session::{Session, SessionAction, TokenStorage};
use super::ClientError;

/// One danger alert per server message. Transport failures raise nothing.
fn raise_alerts(alerts: &AlertQueue, err: &ClientError) {
    if let ClientError::Api { messages, .. } = err {
        for message in messages {
            alerts.set_alert(message.clone(), AlertKind::Danger, DEFAULT_ALERT_TIMEOUT);
        }
    }
}

/// Resolve the stored token to a user.
pub async fn load_user<S: TokenStorage>(api: &ApiClient, session: &mut Session<S>) {
    match api.current_user(session.token()).await {
        Ok(user) => session.dispatch(SessionAction::UserLoaded(user)),
        Err(err) => {
            tracing::debug!(error = %err, "Could not load user");
            session.dispatch(SessionAction::AuthError);
        }
    }
}

pub async fn register<S: TokenStorage>(
    api: &ApiClient,
    session: &mut Session<S>,
    alerts: &AlertQueue,
    name: &str,
    email: &str,
    password: &str,
) {
    match api.register(name, email, password).await {
        Ok(token) => {
            session.dispatch(SessionAction::RegisterSuccess { token });
            load_user(api, session).await;
        }
        Err(err) => {
            raise_alerts(alerts, &err);
            session.dispatch(SessionAction::RegisterFail);
        }
    }
}

pub async fn login<S: TokenStorage>(
    api: &ApiClient,
    session: &mut Session<S>,
    alerts: &AlertQueue,
    email: &str,
    password: &str,
) {
    match api.login(email, password).await {
        Ok(token) => {
            session.dispatch(SessionAction::LoginSuccess { token });
            load_user(api, session).await;
        }
        Err(err) => {
            raise_alerts(alerts, &err);
            session.dispatch(SessionAction::LoginFail);
        }
    }
}

pub fn logout<S: TokenStorage>(session: &mut Session<S>) {
    session.dispatch(SessionAction::Logout);
}
