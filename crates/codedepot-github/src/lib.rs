//! Code Depot GitHub - GitHub contents API adapter
//!
//! Provides async access to the repository contents REST API:
//! - Authenticated client with pinned media type and API version
//! - Folder listing, raw content download, descriptor probe
//! - Create/update with an optional `sha` token, delete with a `sha` token
//!
//! ## Modules
//!
//! - [`client`] - Authenticated HTTP client and status classification
//! - [`contents`] - Contents API calls and response types
//! - [`provider`] - [`IRemoteStore`](codedepot_core::ports::IRemoteStore) implementation

pub mod client;
pub mod contents;
pub mod provider;

use codedepot_core::ports::RemoteStoreError;
use thiserror::Error;

/// Errors that can occur when communicating with the GitHub API
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The token is invalid, expired or missing (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The token lacks access to the repository or is rate limited (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested path or repository does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The `sha` does not match the current file (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The request was well-formed but rejected, e.g. a missing `sha` (422)
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    /// Any other non-success status
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message from the response body
        message: String,
    },

    /// A network-level error occurred
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The configured base URL cannot carry a path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<GitHubError> for RemoteStoreError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Unauthorized(msg) => RemoteStoreError::Unauthorized(msg),
            GitHubError::Forbidden(msg) => RemoteStoreError::Forbidden(msg),
            GitHubError::NotFound(_) => RemoteStoreError::NotFound,
            GitHubError::Conflict(msg) => RemoteStoreError::Conflict(msg),
            GitHubError::Unprocessable(message) => RemoteStoreError::Remote {
                status: 422,
                message,
            },
            GitHubError::Status { status, message } => RemoteStoreError::Remote { status, message },
            GitHubError::NetworkError(e) if e.is_decode() => {
                RemoteStoreError::InvalidResponse(e.to_string())
            }
            GitHubError::NetworkError(e) => RemoteStoreError::Network(e.to_string()),
            GitHubError::InvalidResponse(msg) => RemoteStoreError::InvalidResponse(msg),
            GitHubError::InvalidUrl(msg) => RemoteStoreError::InvalidResponse(msg),
        }
    }
}
