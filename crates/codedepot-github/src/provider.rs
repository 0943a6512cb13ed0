//! GitHubRemoteStore - IRemoteStore implementation for the GitHub contents API
//!
//! Wraps the [`GitHubClient`] and delegates to the [`contents`] module to
//! fulfil the [`IRemoteStore`] port contract.
//!
//! ## Design Notes
//!
//! - GitHub answers a create (no `sha`) on an existing path with 422 rather
//!   than 409. Such writes are reported as [`RemoteStoreError::Conflict`].
//! - An update (with `sha`) rejected with 404 or 422 means the file was
//!   removed or rewritten after the descriptor was read; also a conflict.
//! - No retries; every error is mapped and returned as-is.

use codedepot_core::config::RemoteConfig;
use codedepot_core::domain::{ContentSha, RemotePath};
use codedepot_core::ports::{
    Credentials, DeleteRequest, DirectoryEntry, IRemoteStore, RemoteMetadata, RemoteStoreError,
    WriteRequest,
};
use tracing::{debug, warn};

use crate::client::GitHubClient;
use crate::contents;
use crate::GitHubError;

/// GitHub-backed implementation of [`IRemoteStore`]
pub struct GitHubRemoteStore {
    client: GitHubClient,
}

impl GitHubRemoteStore {
    /// Creates a store that talks to the given client
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    /// Creates a store from the `remote` configuration section
    pub fn from_config(config: &RemoteConfig) -> Result<Self, GitHubError> {
        Ok(Self::new(GitHubClient::from_config(config)?))
    }
}

#[async_trait::async_trait]
impl IRemoteStore for GitHubRemoteStore {
    async fn list_directory(
        &self,
        credentials: &Credentials,
        dir: &RemotePath,
    ) -> Result<Vec<DirectoryEntry>, RemoteStoreError> {
        contents::list_directory(&self.client, credentials, dir)
            .await
            .map_err(RemoteStoreError::from)
    }

    async fn fetch_content(
        &self,
        credentials: &Credentials,
        entry: &DirectoryEntry,
    ) -> Result<String, RemoteStoreError> {
        let url = entry.download_url.as_deref().ok_or_else(|| {
            RemoteStoreError::InvalidResponse(format!("{} has no download URL", entry.name))
        })?;

        contents::download(&self.client, credentials, url)
            .await
            .map_err(RemoteStoreError::from)
    }

    async fn get_metadata(
        &self,
        credentials: &Credentials,
        path: &RemotePath,
    ) -> Result<RemoteMetadata, RemoteStoreError> {
        let item = contents::get_file(&self.client, credentials, path).await?;
        let sha = ContentSha::new(item.sha).map_err(|e| {
            RemoteStoreError::InvalidResponse(format!("Malformed descriptor for {path}: {e}"))
        })?;

        debug!(path = %path, sha = %sha, "Probed remote descriptor");
        Ok(RemoteMetadata { sha })
    }

    async fn put_file(
        &self,
        credentials: &Credentials,
        path: &RemotePath,
        request: &WriteRequest,
    ) -> Result<ContentSha, RemoteStoreError> {
        match contents::put_file(&self.client, credentials, path, request).await {
            Ok(sha) => Ok(sha),
            Err(GitHubError::Unprocessable(message)) if request.sha.is_none() => {
                warn!(path = %path, "Create rejected, file already exists remotely");
                Err(RemoteStoreError::Conflict(message))
            }
            Err(GitHubError::NotFound(message) | GitHubError::Unprocessable(message))
                if request.sha.is_some() =>
            {
                warn!(path = %path, "Update rejected, remote file changed or was removed");
                Err(RemoteStoreError::Conflict(message))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_file(
        &self,
        credentials: &Credentials,
        path: &RemotePath,
        request: &DeleteRequest,
    ) -> Result<(), RemoteStoreError> {
        contents::delete_file(&self.client, credentials, path, request)
            .await
            .map_err(RemoteStoreError::from)
    }
}
