//! Sync engine
//!
//! Keeps an in-memory [`FileSet`] consistent with one namespace folder of
//! the remote store.
//!
//! ## Concurrency token discipline
//!
//! Every remote file carries a content descriptor. A write presents the
//! descriptor it expects to replace; a create presents none. The engine
//! resolves the descriptor with a probe right before writing or deleting
//! (probe-then-write). For a file that was already synced, the probe must
//! return the descriptor the file was last read or written with, otherwise
//! the save fails with a conflict instead of overwriting someone else's
//! change.
//!
//! ## Failure policy
//!
//! Nothing is retried. Local state is only mutated after the remote call
//! succeeded, so a failed save or delete leaves the file set untouched.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use futures_util::future::join_all;
use tracing::{debug, info, warn};

use codedepot_core::domain::{ContentSha, DomainError, FileName, FileSet, Namespace, RemoteFile};
use codedepot_core::ports::{
    Credentials, DeleteRequest, DirectoryEntry, IRemoteStore, ISettingsStore, RemoteStoreError,
    WriteRequest,
};

use crate::SyncError;

/// Synchronization engine for one namespace
///
/// ## Dependencies
///
/// - `remote_store`: Versioned remote store (list, fetch, probe, write, delete)
/// - `settings`: Source of the token and repository for every call
pub struct SyncEngine {
    /// Remote store adapter
    remote_store: Arc<dyn IRemoteStore>,
    /// Settings store holding the credentials
    settings: Arc<dyn ISettingsStore>,
    /// Namespace every remote path is built from
    namespace: Namespace,
    /// Local cache of the namespace contents
    files: FileSet,
}

impl SyncEngine {
    /// Creates an engine with an empty file set
    ///
    /// # Arguments
    /// * `remote_store` - Remote store operations (IRemoteStore)
    /// * `settings` - Credential lookup (ISettingsStore)
    /// * `namespace` - Folder all operations are scoped to
    pub fn new(
        remote_store: Arc<dyn IRemoteStore>,
        settings: Arc<dyn ISettingsStore>,
        namespace: Namespace,
    ) -> Self {
        Self {
            remote_store,
            settings,
            namespace,
            files: FileSet::new(),
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn active_file(&self) -> Option<&RemoteFile> {
        self.files.active()
    }

    /// Switches to another namespace, discarding the local file set if it changed
    pub fn set_namespace(&mut self, namespace: Namespace) {
        if namespace != self.namespace {
            info!(from = %self.namespace, to = %namespace, "Namespace changed, discarding local files");
            self.namespace = namespace;
            self.files.clear();
        }
    }

    /// Discards the local file set
    pub fn reset(&mut self) {
        debug!(count = self.files.len(), "Discarding local files");
        self.files.clear();
    }

    // ========================================================================
    // Local operations
    // ========================================================================

    /// Creates a local-only file and makes it active
    ///
    /// An existing entry with the same name is replaced. The remote store is
    /// not contacted; the file exists remotely only after its first save.
    pub fn create(&mut self, name: FileName, initial_content: impl Into<String>) -> RemoteFile {
        let file = RemoteFile::new(name, initial_content);
        if self.files.insert(file.clone()).is_some() {
            debug!(name = %file.name(), "Replaced existing local entry");
        }
        // Just inserted, so the name is present
        let _ = self.files.set_active(file.name());
        file
    }

    /// Makes an existing local file active
    ///
    /// # Errors
    /// Returns [`SyncError::Domain`] if the file is not in the local set
    pub fn open(&mut self, name: &FileName) -> Result<&RemoteFile, SyncError> {
        self.files.set_active(name)?;
        self.files
            .get(name)
            .ok_or_else(|| DomainError::UnknownFile(name.to_string()).into())
    }

    /// Replaces the local content of a file, keeping its descriptor
    ///
    /// # Errors
    /// Returns [`SyncError::Domain`] if the file is not in the local set
    pub fn edit(
        &mut self,
        name: &FileName,
        content: impl Into<String>,
    ) -> Result<&RemoteFile, SyncError> {
        Ok(self.files.update_content(name, content)?)
    }

    // ========================================================================
    // Remote operations
    // ========================================================================

    /// Lists the namespace folder and fetches every file's content
    ///
    /// Replaces the local file set wholesale. The active pointer survives if
    /// the file is still present. Entries that are not files, lack a content
    /// URL, have an unusable name, or fail to fetch are left out.
    ///
    /// # Errors
    /// Fails only if credentials are missing or the listing itself fails.
    /// A missing namespace folder yields an empty set.
    pub async fn list_and_fetch(&mut self) -> Result<&FileSet, SyncError> {
        let credentials = self.credentials()?;
        let dir = self.namespace.dir_path();

        let entries = match self.remote_store.list_directory(&credentials, &dir).await {
            Ok(entries) => entries,
            Err(RemoteStoreError::NotFound) => {
                info!(path = %dir, "Namespace folder does not exist yet");
                Vec::new()
            }
            Err(e) => return Err(SyncError::from_remote(&dir.to_string(), e)),
        };

        let candidates: Vec<(FileName, DirectoryEntry)> = entries
            .into_iter()
            .filter(DirectoryEntry::is_file)
            .filter_map(|entry| {
                if entry.download_url.is_none() {
                    warn!(name = %entry.name, "Skipping entry without download URL");
                    return None;
                }
                match FileName::new(entry.name.clone()) {
                    Ok(name) => Some((name, entry)),
                    Err(e) => {
                        warn!(name = %entry.name, error = %e, "Skipping entry with invalid name");
                        None
                    }
                }
            })
            .collect();

        let store = &self.remote_store;
        let creds = &credentials;
        let fetches = candidates.into_iter().map(|(name, entry)| async move {
            let result = store.fetch_content(creds, &entry).await;
            (name, entry.sha, result)
        });

        let mut files = FileSet::new();
        for (name, sha, result) in join_all(fetches).await {
            match result {
                Ok(content) => {
                    let file = match sha {
                        Some(sha) => RemoteFile::from_remote(name, content, sha),
                        None => RemoteFile::new(name, content),
                    };
                    files.insert(file);
                }
                Err(e) => warn!(name = %name, error = %e, "Skipping file that failed to fetch"),
            }
        }

        let previous_active = self.files.active_name().cloned();
        self.files = files;
        if let Some(name) = previous_active {
            if self.files.contains(&name) {
                let _ = self.files.set_active(&name);
            }
        }

        info!(path = %dir, count = self.files.len(), "Files loaded");
        Ok(&self.files)
    }

    /// Writes a file to the remote store
    ///
    /// Probes the current descriptor first. A file without a descriptor is
    /// written with whatever the probe found (none for a first save). A file
    /// that carries a descriptor must still match the remote one.
    ///
    /// On success the returned file (and the local entry) carries the
    /// descriptor of the newly written content.
    ///
    /// # Errors
    /// - [`SyncError::NotConfigured`] before any network call if credentials are missing
    /// - [`SyncError::Conflict`] if the remote descriptor moved or the remote
    ///   store rejects the token
    pub async fn save(&mut self, file: &RemoteFile) -> Result<RemoteFile, SyncError> {
        let credentials = self.credentials()?;
        let name = file.name();
        let path = self.namespace.file_path(name);

        let remote_sha = self.probe(&credentials, name).await?;
        let token = match (file.sha(), remote_sha) {
            (None, remote) => remote,
            (Some(local), Some(remote)) if *local == remote => Some(remote),
            (Some(local), Some(remote)) => {
                warn!(name = %name, local = %local, remote = %remote, "Remote file changed since last read");
                return Err(SyncError::Conflict {
                    name: name.to_string(),
                    message: format!(
                        "{name} was changed remotely (expected {local}, found {remote})"
                    ),
                });
            }
            (Some(_), None) => {
                warn!(name = %name, "Remote file deleted since last read");
                return Err(SyncError::Conflict {
                    name: name.to_string(),
                    message: format!("{name} was deleted remotely"),
                });
            }
        };

        let request = WriteRequest {
            message: format!("Save {name}"),
            content: BASE64.encode(file.content().as_bytes()),
            sha: token,
        };

        let new_sha = self
            .remote_store
            .put_file(&credentials, &path, &request)
            .await
            .map_err(|e| SyncError::from_remote(name.as_str(), e))?;

        info!(name = %name, sha = %new_sha, created = request.sha.is_none(), "File saved");

        let saved = file.clone().with_sha(new_sha);
        self.files.insert(saved.clone());
        Ok(saved)
    }

    /// Saves the local entry with the given name
    ///
    /// # Errors
    /// Returns [`SyncError::Domain`] if the file is not in the local set,
    /// otherwise the errors of [`save`](Self::save)
    pub async fn save_by_name(&mut self, name: &FileName) -> Result<RemoteFile, SyncError> {
        let file = self
            .files
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::UnknownFile(name.to_string()))?;
        self.save(&file).await
    }

    /// Deletes a file remotely and locally
    ///
    /// A file that does not exist remotely counts as deleted. The local entry
    /// is removed in both cases, and the active pointer is cleared if it
    /// pointed at this file.
    ///
    /// # Errors
    /// [`SyncError::Conflict`] if the file changed between probe and delete
    pub async fn delete(&mut self, name: &FileName) -> Result<(), SyncError> {
        let credentials = self.credentials()?;
        let path = self.namespace.file_path(name);

        match self.probe(&credentials, name).await? {
            None => {
                info!(name = %name, "File not present remotely, removing local entry");
            }
            Some(sha) => {
                let request = DeleteRequest {
                    message: format!("Delete {name}"),
                    sha,
                };
                match self
                    .remote_store
                    .delete_file(&credentials, &path, &request)
                    .await
                {
                    Ok(()) => info!(name = %name, "File deleted"),
                    Err(RemoteStoreError::NotFound) => {
                        info!(name = %name, "File already gone remotely");
                    }
                    Err(e) => return Err(SyncError::from_remote(name.as_str(), e)),
                }
            }
        }

        self.files.remove(name);
        Ok(())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Loads credentials, failing with `NotConfigured` if incomplete
    fn credentials(&self) -> Result<Credentials, SyncError> {
        Credentials::load(self.settings.as_ref())
            .map_err(|e| SyncError::Settings(format!("{e:#}")))?
            .ok_or(SyncError::NotConfigured)
    }

    /// Reads the current remote descriptor; `None` only on an explicit not-found
    async fn probe(
        &self,
        credentials: &Credentials,
        name: &FileName,
    ) -> Result<Option<ContentSha>, SyncError> {
        let path = self.namespace.file_path(name);
        match self.remote_store.get_metadata(credentials, &path).await {
            Ok(meta) => Ok(Some(meta.sha)),
            Err(RemoteStoreError::NotFound) => Ok(None),
            Err(e) => Err(SyncError::from_remote(name.as_str(), e)),
        }
    }
}
