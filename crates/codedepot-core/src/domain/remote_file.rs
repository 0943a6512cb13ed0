//! RemoteFile entity
//!
//! The unit of storage. A file created locally has no content descriptor
//! until its first successful remote write; from then on the descriptor is
//! refreshed by every successful write.

use serde::{Deserialize, Serialize};

use super::language::Language;
use super::newtypes::{ContentSha, FileName};

/// Synchronization state derived from descriptor presence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Created locally, never written remotely
    LocalOnly,
    /// Carries the descriptor of the last known remote state
    Synced,
}

/// A text file inside the namespace folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    name: FileName,
    content: String,
    sha: Option<ContentSha>,
    language: Language,
}

impl RemoteFile {
    /// A local-only file with no descriptor
    #[must_use]
    pub fn new(name: FileName, content: impl Into<String>) -> Self {
        let language = Language::for_file(&name);
        Self {
            name,
            content: content.into(),
            sha: None,
            language,
        }
    }

    /// A file read from the remote store with its current descriptor
    #[must_use]
    pub fn from_remote(name: FileName, content: impl Into<String>, sha: ContentSha) -> Self {
        Self::new(name, content).with_sha(sha)
    }

    /// Same file carrying a different descriptor
    #[must_use]
    pub fn with_sha(mut self, sha: ContentSha) -> Self {
        self.sha = Some(sha);
        self
    }

    #[must_use]
    pub fn name(&self) -> &FileName {
        &self.name
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content descriptor of the last known remote state
    #[must_use]
    pub fn sha(&self) -> Option<&ContentSha> {
        self.sha.as_ref()
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn state(&self) -> SyncState {
        if self.sha.is_some() {
            SyncState::Synced
        } else {
            SyncState::LocalOnly
        }
    }

    /// Replace the content; the descriptor is kept
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}
