// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transient client alerts that dismiss themselves.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

pub const DEFAULT_ALERT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub message: String,
    pub kind: AlertKind,
}

/// Shared list of visible alerts. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct AlertQueue {
    alerts: Arc<Mutex<Vec<Alert>>>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Alert>> {
        // A panicked holder cannot leave the Vec half-updated.
        self.alerts.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Show an alert and remove it after `timeout`.
    ///
    /// Must be called inside a tokio runtime. The removal is not cancelled if
    /// the queue is dropped.
    pub fn set_alert(&self, message: impl Into<String>, kind: AlertKind, timeout: Duration) -> Uuid {
        let alert = Alert {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
        };
        let id = alert.id;
        self.lock().push(alert);

        let queue = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            queue.remove_alert(id);
        });

        id
    }

    pub fn remove_alert(&self, id: Uuid) {
        self.lock().retain(|alert| alert.id != id);
    }

    /// Currently visible alerts, oldest first.
    pub fn alerts(&self) -> Vec<Alert> {
        self.lock().clone()
    }
}
