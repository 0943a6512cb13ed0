//! Editor session
//!
//! Drives a [`SyncEngine`] on behalf of a user interface and turns each
//! outcome into one [`Notification`]. The engine's structured result is
//! returned unchanged so the caller can still react to it (for example by
//! prompting for settings when [`SyncError::requires_reconfiguration`]).
//!
//! All operations take `&mut self`, so a session cannot run two operations
//! at once.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use codedepot_core::domain::{DomainError, FileName, RemoteFile};
use codedepot_core::ports::{INotificationService, Notification};

use crate::engine::SyncEngine;
use crate::SyncError;

/// Message shown whenever an operation needs credentials that are missing
pub const NOT_CONFIGURED_MESSAGE: &str = "Please configure GitHub settings first";

/// Errors specific to session operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Save was requested with no file open
    #[error("No file is open")]
    NoActiveFile,

    /// The engine reported a failure
    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        SessionError::Sync(SyncError::Domain(err))
    }
}

/// View-model use case wrapping the engine and a notifier
pub struct EditorSession {
    engine: SyncEngine,
    notifier: Arc<dyn INotificationService>,
}

impl EditorSession {
    pub fn new(engine: SyncEngine, notifier: Arc<dyn INotificationService>) -> Self {
        Self { engine, notifier }
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    /// Loads the namespace contents
    ///
    /// # Returns
    /// The number of files loaded
    pub async fn load(&mut self) -> Result<usize, SessionError> {
        match self.engine.list_and_fetch().await {
            Ok(files) => Ok(files.len()),
            Err(e) => {
                let notification = match &e {
                    SyncError::NotConfigured => Notification::error(NOT_CONFIGURED_MESSAGE, ""),
                    other => Notification::error("Failed to load files", other.user_message()),
                };
                self.notify(notification).await;
                Err(e.into())
            }
        }
    }

    /// Creates a local file and opens it
    pub async fn new_file(
        &mut self,
        name: &str,
        initial_content: &str,
    ) -> Result<RemoteFile, SessionError> {
        let name = match FileName::new(name.trim().to_string()) {
            Ok(name) => name,
            Err(e) => {
                self.notify(Notification::error("Invalid file name", e.to_string()))
                    .await;
                return Err(e.into());
            }
        };
        Ok(self.engine.create(name, initial_content))
    }

    /// Opens an existing local file
    pub fn open(&mut self, name: &FileName) -> Result<&RemoteFile, SessionError> {
        Ok(self.engine.open(name)?)
    }

    /// Replaces the active file's content
    pub fn edit(&mut self, content: impl Into<String>) -> Result<&RemoteFile, SessionError> {
        let name = self
            .engine
            .active_file()
            .map(|f| f.name().clone())
            .ok_or(SessionError::NoActiveFile)?;
        Ok(self.engine.edit(&name, content)?)
    }

    /// Saves the active file
    pub async fn save_active(&mut self) -> Result<RemoteFile, SessionError> {
        let file = self
            .engine
            .active_file()
            .cloned()
            .ok_or(SessionError::NoActiveFile)?;

        match self.engine.save(&file).await {
            Ok(saved) => {
                self.notify(Notification::success(format!(
                    "{} saved successfully!",
                    saved.name()
                )))
                .await;
                Ok(saved)
            }
            Err(e) => {
                let notification = match &e {
                    SyncError::NotConfigured => Notification::error(NOT_CONFIGURED_MESSAGE, ""),
                    SyncError::Network(_) => Notification::error("Failed to save file", e.user_message()),
                    other => Notification::error(format!("Failed to save: {}", other.user_message()), ""),
                };
                self.notify(notification).await;
                Err(e.into())
            }
        }
    }

    /// Deletes a file remotely and locally
    pub async fn delete(&mut self, name: &FileName) -> Result<(), SessionError> {
        match self.engine.delete(name).await {
            Ok(()) => {
                self.notify(Notification::success(format!("{name} deleted successfully!")))
                    .await;
                Ok(())
            }
            Err(e) => {
                let notification = match &e {
                    SyncError::NotConfigured => Notification::error(NOT_CONFIGURED_MESSAGE, ""),
                    other => Notification::error("Failed to delete file", other.user_message()),
                };
                self.notify(notification).await;
                Err(e.into())
            }
        }
    }

    /// Delivery failures are logged, never propagated
    async fn notify(&self, notification: Notification) {
        if let Err(e) = self.notifier.notify(&notification).await {
            warn!(error = %e, title = %notification.title, "Failed to deliver notification");
        }
    }
}
