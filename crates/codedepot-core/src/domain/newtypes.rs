//! Domain newtypes with validation
//!
//! This module provides strongly-typed wrappers for the identifiers and values
//! that flow between the engine and the remote store. Each newtype ensures data
//! validity at construction time, so a value that exists is a value that is safe
//! to put into a remote path or a request body.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;

// ============================================================================
// FileName
// ============================================================================

/// Name of a file inside a namespace folder
///
/// Names are case-sensitive and double as the last remote path segment, so
/// they may not contain separators or be a relative directory reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileName(String);

impl FileName {
    /// Create a new FileName
    ///
    /// # Errors
    /// Returns error if the name is empty, is `.` or `..`, or contains a path
    /// separator or a control character
    pub fn new(name: String) -> Result<Self, DomainError> {
        if name.is_empty() {
            return Err(DomainError::InvalidFileName(
                "File name cannot be empty".to_string(),
            ));
        }

        if name == "." || name == ".." {
            return Err(DomainError::InvalidFileName(format!(
                "File name cannot be a directory reference: {name}"
            )));
        }

        if name.contains('/') || name.contains('\\') {
            return Err(DomainError::InvalidFileName(format!(
                "File name cannot contain path separators: {name}"
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(DomainError::InvalidFileName(format!(
                "File name cannot contain control characters: {name:?}"
            )));
        }

        Ok(Self(name))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extension after the last `.`, if the name has one
    ///
    /// `"app.py"` yields `"py"`, `".bashrc"` yields `"bashrc"`, `"Makefile"`
    /// yields `None` and `"notes."` yields `""`.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(_, ext)| ext)
    }
}

impl Display for FileName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FileName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for FileName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<FileName> for String {
    fn from(name: FileName) -> Self {
        name.0
    }
}

// ============================================================================
// AccessKey
// ============================================================================

/// Opaque per-user key that partitions files inside the shared repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessKey(String);

impl AccessKey {
    /// Create a new AccessKey
    ///
    /// # Errors
    /// Returns error if the key is empty or contains characters other than
    /// ASCII alphanumerics, `-` and `_`
    pub fn new(key: String) -> Result<Self, DomainError> {
        if key.is_empty() {
            return Err(DomainError::InvalidAccessKey(
                "Access key cannot be empty".to_string(),
            ));
        }

        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidAccessKey(format!(
                "Access key contains invalid characters: {key}"
            )));
        }

        Ok(Self(key))
    }

    /// Generate a fresh random access key
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for display, e.g. `a1b2c3...`
    #[must_use]
    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(6).collect();
        format!("{prefix}...")
    }
}

impl Display for AccessKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccessKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim().to_string())
    }
}

impl TryFrom<String> for AccessKey {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AccessKey> for String {
    fn from(key: AccessKey) -> Self {
        key.0
    }
}

// ============================================================================
// RepositoryId
// ============================================================================

/// Remote repository in `owner/repo` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryId {
    owner: String,
    repo: String,
}

impl RepositoryId {
    /// Parse a repository identifier
    ///
    /// # Errors
    /// Returns error unless the value is exactly two non-empty, whitespace-free
    /// segments joined by a single `/`
    pub fn new(value: String) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        let mut parts = trimmed.split('/');
        let (owner, repo) = match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(repo), None) => (owner, repo),
            _ => return Err(DomainError::InvalidRepository(value)),
        };

        let valid = |s: &str| {
            !s.is_empty() && !s.chars().any(char::is_whitespace) && s != "." && s != ".."
        };
        if !valid(owner) || !valid(repo) {
            return Err(DomainError::InvalidRepository(value));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Repository owner (user or organisation)
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl Display for RepositoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepositoryId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for RepositoryId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RepositoryId> for String {
    fn from(id: RepositoryId) -> Self {
        id.to_string()
    }
}

// ============================================================================
// ContentSha
// ============================================================================

/// Remote-assigned descriptor of a file's current content state
///
/// The value is opaque to the engine; it is only ever compared for equality
/// and echoed back to the remote store as the optimistic-concurrency token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentSha(String);

impl ContentSha {
    /// Create a new ContentSha
    ///
    /// # Errors
    /// Returns error if the descriptor is empty or contains whitespace
    pub fn new(sha: String) -> Result<Self, DomainError> {
        if sha.is_empty() {
            return Err(DomainError::InvalidContentSha(
                "Content descriptor cannot be empty".to_string(),
            ));
        }

        if sha.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidContentSha(format!(
                "Content descriptor contains whitespace: {sha:?}"
            )));
        }

        Ok(Self(sha))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ContentSha {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContentSha {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for ContentSha {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ContentSha> for String {
    fn from(sha: ContentSha) -> Self {
        sha.0
    }
}
