//! Code Depot Sync - Remote file synchronization engine
//!
//! Provides:
//! - List-and-fetch of a namespace folder into an in-memory file set
//! - Local create/open/edit of files
//! - Save with optimistic concurrency (content descriptor as token)
//! - Idempotent delete
//!
//! ## Modules
//!
//! - [`engine`] - The sync engine owning the local file set
//! - [`session`] - Editor session that drives the engine and reports outcomes

pub mod engine;
pub mod session;

use codedepot_core::domain::DomainError;
use codedepot_core::ports::RemoteStoreError;
use thiserror::Error;

/// Errors returned by sync engine operations
///
/// Every public engine operation returns either a value or one of these;
/// nothing is retried on the caller's behalf.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The access token or the repository is not configured
    #[error("GitHub settings are not configured")]
    NotConfigured,

    /// The addressed file or folder does not exist remotely
    #[error("Not found: {0}")]
    NotFound(String),

    /// The content descriptor no longer matches the remote file
    #[error("Conflict on {name}: {message}")]
    Conflict {
        /// File the write or delete targeted
        name: String,
        /// Remote message, or a description of the local mismatch
        message: String,
    },

    /// The access token was rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The access token lacks permission
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// Any other non-success status, message passed through verbatim
    #[error("{message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Remote message
        message: String,
    },

    /// The remote response could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A domain invariant was violated (invalid name, unknown file, ...)
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// The settings store could not be read
    #[error("Settings error: {0}")]
    Settings(String),
}

impl SyncError {
    /// Whether the caller should prompt the user to fix their credentials
    #[must_use]
    pub fn requires_reconfiguration(&self) -> bool {
        matches!(
            self,
            SyncError::NotConfigured | SyncError::Unauthorized(_) | SyncError::Forbidden(_)
        )
    }

    /// Human-readable message suitable for a notification
    ///
    /// Conflicts and remote errors carry the remote's own text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Conflict { message, .. } => message.clone(),
            SyncError::Remote { message, .. } => message.clone(),
            SyncError::Unauthorized(message) | SyncError::Forbidden(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Maps a remote store error for an operation on `target`
    pub(crate) fn from_remote(target: &str, err: RemoteStoreError) -> Self {
        match err {
            RemoteStoreError::NotFound => SyncError::NotFound(target.to_string()),
            RemoteStoreError::Conflict(message) => SyncError::Conflict {
                name: target.to_string(),
                message,
            },
            RemoteStoreError::Unauthorized(msg) => SyncError::Unauthorized(msg),
            RemoteStoreError::Forbidden(msg) => SyncError::Forbidden(msg),
            RemoteStoreError::Network(msg) => SyncError::Network(msg),
            RemoteStoreError::Remote { status, message } => SyncError::Remote { status, message },
            RemoteStoreError::InvalidResponse(msg) => SyncError::InvalidResponse(msg),
        }
    }
}
