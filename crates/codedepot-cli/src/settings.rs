//! Keyring-backed settings store
//!
//! Each setting is one keyring entry: the service name comes from
//! `keyring.service` in the configuration and the setting key is the
//! keyring username.

use anyhow::{Context, Result};
use codedepot_core::ports::ISettingsStore;
use tracing::debug;

/// [`ISettingsStore`] on the OS credential store
pub struct KeyringSettingsStore {
    service: String,
}

impl KeyringSettingsStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, key).context("Failed to create keyring entry")
    }
}

impl ISettingsStore for KeyringSettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => {
                debug!(key, "No keyring entry");
                Ok(None)
            }
            Err(e) => Err(anyhow::Error::new(e).context(format!("Failed to read '{key}' from keyring"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .with_context(|| format!("Failed to store '{key}' in keyring"))?;
        debug!(key, "Stored keyring entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(anyhow::Error::new(e).context(format!("Failed to delete '{key}' from keyring"))),
        }
    }
}
