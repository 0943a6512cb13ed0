//! Per-user namespace and remote paths
//!
//! Every remote path is composed as `<root>/<accessKey>/<fileName>`. A
//! [`RemotePath`] can only be built through a [`Namespace`], and every segment
//! that goes into it has already been validated, so no operation can address
//! anything outside the namespace folder.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::newtypes::{AccessKey, FileName};

/// Folder at the repository root under which all namespaces live
pub const DEFAULT_ROOT_FOLDER: &str = "code";

/// A repository-relative path made of validated segments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemotePath {
    segments: Vec<String>,
}

impl RemotePath {
    /// Path segments, unencoded
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl Display for RemotePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// Per-access-key folder scoping a user's files inside the repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace {
    root: Vec<String>,
    access_key: AccessKey,
}

impl Namespace {
    /// Namespace under the default `code` root folder
    #[must_use]
    pub fn new(access_key: AccessKey) -> Self {
        Self {
            root: vec![DEFAULT_ROOT_FOLDER.to_string()],
            access_key,
        }
    }

    /// Namespace under a custom root folder such as `"code"` or `"users/code"`
    ///
    /// # Errors
    /// Returns error if any root segment is empty, a directory reference, or
    /// contains a backslash or control character
    pub fn with_root(root: &str, access_key: AccessKey) -> Result<Self, DomainError> {
        let trimmed = root.trim_matches('/');
        if trimmed.is_empty() {
            return Err(DomainError::InvalidRemotePath(
                "Root folder cannot be empty".to_string(),
            ));
        }

        let root = trimmed
            .split('/')
            .map(|segment| {
                FileName::new(segment.to_string())
                    .map(String::from)
                    .map_err(|_| {
                        DomainError::InvalidRemotePath(format!(
                            "Invalid root folder segment {segment:?} in {root:?}"
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { root, access_key })
    }

    /// The access key this namespace belongs to
    #[must_use]
    pub fn access_key(&self) -> &AccessKey {
        &self.access_key
    }

    /// Root folder, slash-joined
    #[must_use]
    pub fn root(&self) -> String {
        self.root.join("/")
    }

    /// The namespace folder: `<root>/<accessKey>`
    #[must_use]
    pub fn dir_path(&self) -> RemotePath {
        let mut segments = self.root.clone();
        segments.push(self.access_key.as_str().to_string());
        RemotePath { segments }
    }

    /// Path of one file: `<root>/<accessKey>/<name>`
    #[must_use]
    pub fn file_path(&self, name: &FileName) -> RemotePath {
        let mut path = self.dir_path();
        path.segments.push(name.as_str().to_string());
        path
    }

    /// Whether `path` lies inside this namespace folder
    #[must_use]
    pub fn contains(&self, path: &RemotePath) -> bool {
        let dir = self.dir_path();
        path.segments.len() >= dir.segments.len() && path.segments.starts_with(&dir.segments)
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_path())
    }
}
