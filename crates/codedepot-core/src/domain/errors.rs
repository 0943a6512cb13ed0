//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! including validation failures and file set invariant violations.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// File name is empty or could escape the namespace folder
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    /// Access key is empty or contains characters outside `[A-Za-z0-9_-]`
    #[error("Invalid access key: {0}")]
    InvalidAccessKey(String),

    /// Repository identifier is not in `owner/repo` form
    #[error("Invalid repository (expected owner/repo): {0}")]
    InvalidRepository(String),

    /// Content descriptor is empty or malformed
    #[error("Invalid content descriptor: {0}")]
    InvalidContentSha(String),

    /// Invalid remote path segment
    #[error("Invalid remote path: {0}")]
    InvalidRemotePath(String),

    /// The named file is not part of the local file set
    #[error("File not in local set: {0}")]
    UnknownFile(String),
}
