//! Settings store port (driven/secondary port)
//!
//! A plain key-value store that persists the few strings the application
//! needs between runs: the access token, the repository identifier and the
//! user's access key. [`Credentials::load`] reads the first two and reports
//! "not configured" when either is missing.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because storage failures are adapter-specific
//!   (keyring daemon unavailable, file permissions, ...).
//! - Synchronous on purpose: every known backend is a local lookup.

use std::fmt;

use anyhow::{Context, Result};

use crate::domain::newtypes::{AccessKey, RepositoryId};

/// Key under which the access token is stored
pub const TOKEN_KEY: &str = "github_pat";

/// Key under which the `owner/repo` identifier is stored
pub const REPOSITORY_KEY: &str = "github_repo";

/// Key under which the user's access key is stored
pub const ACCESS_KEY_KEY: &str = "access_key";

/// Port trait for the persistent key-value settings store
pub trait ISettingsStore: Send + Sync {
    /// Reads a value; `Ok(None)` if the key was never set
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a value; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Token plus repository: everything needed to address the remote store
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    repository: RepositoryId,
}

impl Credentials {
    #[must_use]
    pub fn new(token: impl Into<String>, repository: RepositoryId) -> Self {
        Self {
            token: token.into(),
            repository,
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn repository(&self) -> &RepositoryId {
        &self.repository
    }

    /// Loads credentials from the settings store
    ///
    /// # Returns
    /// `Ok(None)` when the token or the repository is missing or blank
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or the stored repository
    /// is not in `owner/repo` form
    pub fn load(store: &dyn ISettingsStore) -> Result<Option<Self>> {
        let token = store.get(TOKEN_KEY)?.filter(|t| !t.trim().is_empty());
        let repository = store.get(REPOSITORY_KEY)?.filter(|r| !r.trim().is_empty());

        match (token, repository) {
            (Some(token), Some(repository)) => {
                let repository = RepositoryId::new(repository)
                    .context("Stored repository setting is invalid")?;
                Ok(Some(Self::new(token.trim(), repository)))
            }
            _ => Ok(None),
        }
    }

    /// Persists both values to the settings store
    pub fn store(&self, store: &dyn ISettingsStore) -> Result<()> {
        store.set(TOKEN_KEY, &self.token)?;
        store.set(REPOSITORY_KEY, &self.repository.to_string())?;
        Ok(())
    }

    /// Removes both values from the settings store
    pub fn clear(store: &dyn ISettingsStore) -> Result<()> {
        store.remove(TOKEN_KEY)?;
        store.remove(REPOSITORY_KEY)?;
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("repository", &self.repository)
            .finish()
    }
}

/// Reads the stored access key, if any
///
/// # Errors
/// Returns an error if the store cannot be read or the stored key is invalid
pub fn load_access_key(store: &dyn ISettingsStore) -> Result<Option<AccessKey>> {
    match store.get(ACCESS_KEY_KEY)? {
        Some(raw) if !raw.trim().is_empty() => {
            let key: AccessKey = raw.parse().context("Stored access key is invalid")?;
            Ok(Some(key))
        }
        _ => Ok(None),
    }
}
