//! Remote store port (driven/secondary port)
//!
//! This module defines the interface the sync engine uses to talk to the
//! versioned remote store. The primary implementation targets the GitHub
//! contents API, but nothing here is GitHub-specific: the store lists a
//! folder, fetches raw content, probes a file's descriptor, writes a file
//! with an optional concurrency token, and deletes a file with one.
//!
//! ## Design Notes
//!
//! - Uses a typed [`RemoteStoreError`] instead of `anyhow` because the engine
//!   must tell not-found and conflict apart from every other failure.
//! - Every method receives the resolved [`Credentials`]; the store holds no
//!   credential state of its own.
//! - Uses `#[async_trait]` for async trait methods.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::namespace::RemotePath;
use crate::domain::newtypes::ContentSha;
use crate::ports::settings_store::Credentials;

// ============================================================================
// Errors
// ============================================================================

/// Errors a remote store reports back to the engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteStoreError {
    /// The addressed path does not exist
    #[error("Not found")]
    NotFound,

    /// The presented descriptor does not match the remote state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The credential was rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The credential lacks permission for this repository or operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Transport-level failure (DNS, connection, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Any other non-success status; `message` is the remote's own text
    #[error("Remote error ({status}): {message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Message from the response body, passed through verbatim
        message: String,
    },

    /// The response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

// ============================================================================
// DTOs
// ============================================================================

/// Kind of a directory listing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks, submodules and anything else the engine ignores
    Other,
}

/// One entry of a folder listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Entry name (last path segment)
    pub name: String,
    /// File, directory or other
    pub kind: EntryKind,
    /// Where the raw content can be fetched (absent for directories)
    pub download_url: Option<String>,
    /// Current content descriptor, when the listing reports one
    pub sha: Option<ContentSha>,
}

impl DirectoryEntry {
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Result of a descriptor probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMetadata {
    /// Current content descriptor
    pub sha: ContentSha,
}

/// Body of a create-or-update request
///
/// A write without `sha` creates the file; a write with `sha` replaces the
/// file only if the remote descriptor still equals it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRequest {
    /// Commit message, e.g. `"Save app.py"`
    pub message: String,
    /// Base64-encoded content bytes
    pub content: String,
    /// Concurrency token, present only for updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<ContentSha>,
}

/// Body of a delete request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// Commit message, e.g. `"Delete app.py"`
    pub message: String,
    /// Concurrency token
    pub sha: ContentSha,
}

// ============================================================================
// IRemoteStore trait
// ============================================================================

/// Port trait for the versioned remote store
///
/// ## Implementation Notes
///
/// - Implementations must not retry; every failure goes straight back to
///   the engine, which reports it to its caller.
/// - A missing path is always [`RemoteStoreError::NotFound`], never an
///   empty success, so the engine can decide what absence means.
#[async_trait::async_trait]
pub trait IRemoteStore: Send + Sync {
    /// Lists the entries of a folder
    ///
    /// # Arguments
    /// * `credentials` - Token and repository to operate on
    /// * `dir` - Folder to list
    async fn list_directory(
        &self,
        credentials: &Credentials,
        dir: &RemotePath,
    ) -> Result<Vec<DirectoryEntry>, RemoteStoreError>;

    /// Fetches the raw text content of a listed file
    ///
    /// # Arguments
    /// * `credentials` - Token and repository to operate on
    /// * `entry` - A file entry returned by [`list_directory`](Self::list_directory)
    async fn fetch_content(
        &self,
        credentials: &Credentials,
        entry: &DirectoryEntry,
    ) -> Result<String, RemoteStoreError>;

    /// Reads a file's current descriptor
    ///
    /// # Returns
    /// The metadata, or [`RemoteStoreError::NotFound`] if the file does not exist
    async fn get_metadata(
        &self,
        credentials: &Credentials,
        path: &RemotePath,
    ) -> Result<RemoteMetadata, RemoteStoreError>;

    /// Creates or updates a file
    ///
    /// # Returns
    /// The descriptor of the newly written content
    async fn put_file(
        &self,
        credentials: &Credentials,
        path: &RemotePath,
        request: &WriteRequest,
    ) -> Result<ContentSha, RemoteStoreError>;

    /// Deletes a file whose descriptor still equals `request.sha`
    async fn delete_file(
        &self,
        credentials: &Credentials,
        path: &RemotePath,
        request: &DeleteRequest,
    ) -> Result<(), RemoteStoreError>;
}
