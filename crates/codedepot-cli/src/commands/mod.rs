//! CLI subcommands
//!
//! Every command receives a [`CommandContext`] carrying the output format and
//! the configuration path, and builds whatever it needs from there.

pub mod auth;
pub mod config;
pub mod files;
pub mod key;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use codedepot_core::config::Config;
use codedepot_core::ports::{load_access_key, ISettingsStore};
use codedepot_github::provider::GitHubRemoteStore;
use codedepot_sync::engine::SyncEngine;
use codedepot_sync::session::EditorSession;

use crate::notifier::TerminalNotifier;
use crate::output::{get_formatter, OutputFormat, OutputFormatter};
use crate::settings::KeyringSettingsStore;

/// Shared inputs for command execution
pub struct CommandContext {
    pub format: OutputFormat,
    pub config_path: PathBuf,
}

impl CommandContext {
    pub fn new(format: OutputFormat, config_path: PathBuf) -> Self {
        Self {
            format,
            config_path,
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        get_formatter(self.is_json())
    }

    pub fn config(&self) -> Config {
        Config::load_or_default(&self.config_path)
    }

    pub fn settings(&self) -> Arc<dyn ISettingsStore> {
        Arc::new(KeyringSettingsStore::new(self.config().keyring.service))
    }

    /// Builds an editor session for the stored access key
    ///
    /// # Errors
    /// Fails if no access key is stored or the configured remote is unusable
    pub fn session(&self) -> Result<EditorSession> {
        let config = self.config();
        let settings = self.settings();

        let access_key = load_access_key(settings.as_ref())?.context(
            "No access key. Run 'codedepot key generate' or 'codedepot key login <key>' first",
        )?;
        let namespace = config
            .namespace(access_key)
            .context("Invalid remote.root_folder in configuration")?;
        let store = GitHubRemoteStore::from_config(&config.remote)
            .context("Failed to create GitHub client")?;

        let engine = SyncEngine::new(Arc::new(store), settings, namespace);
        Ok(EditorSession::new(
            engine,
            Arc::new(TerminalNotifier::new(self.format)),
        ))
    }
}
