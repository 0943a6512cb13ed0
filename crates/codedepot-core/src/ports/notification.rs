//! Notification service port (driven/secondary port)
//!
//! This module defines the interface for reporting operation outcomes to
//! the user. Implementations may print to a terminal, raise a toast, or
//! collect messages for tests.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because notification delivery is adapter-specific.
//! - Notifications are fire-and-forget; callers log and ignore delivery
//!   failures rather than failing the operation that produced them.

use serde::{Deserialize, Serialize};

/// Outcome category of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// Informational message
    Info,
    /// Operation completed successfully
    Success,
    /// Operation failed
    Error,
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// A human-readable outcome message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Short summary of what happened
    pub title: String,
    /// Optional detail line
    pub body: String,
    /// Outcome category
    pub level: NotificationLevel,
}

impl Notification {
    /// Creates an informational notification with the given title and body
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            level: NotificationLevel::Info,
        }
    }

    /// Sets the level
    pub fn with_level(mut self, level: NotificationLevel) -> Self {
        self.level = level;
        self
    }

    /// Creates a success notification without detail text
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title, "").with_level(NotificationLevel::Success)
    }

    /// Creates an error notification
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body).with_level(NotificationLevel::Error)
    }
}

/// Port trait for user-facing outcome notifications
#[async_trait::async_trait]
pub trait INotificationService: Send + Sync {
    /// Delivers one notification
    ///
    /// # Arguments
    /// * `notification` - The notification content and level
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()>;
}
