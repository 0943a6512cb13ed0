//! Configuration module for Code Depot.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.
//! Secrets never live here: the token and repository go through the settings
//! store port.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{AccessKey, DomainError, Namespace};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for Code Depot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub logging: LoggingConfig,
    pub keyring: KeyringConfig,
}

/// Remote store (GitHub REST API) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the REST API.
    pub api_base_url: String,
    /// Repository folder under which every access-key namespace lives.
    pub root_folder: String,
    /// Value of the `Accept` header pinning the media type.
    pub accept: String,
    /// Value of the `X-GitHub-Api-Version` header.
    pub api_version: String,
    /// Value of the `User-Agent` header (required by GitHub).
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

/// Secure settings storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyringConfig {
    /// Keyring service name under which settings are stored.
    pub service: String,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Write the configuration as YAML, creating the parent directory.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/codedepot/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("codedepot")
            .join("config.yaml")
    }

    /// Namespace for `access_key` under the configured root folder.
    pub fn namespace(&self, access_key: AccessKey) -> Result<Namespace, DomainError> {
        Namespace::with_root(&self.remote.root_folder, access_key)
    }
}

// ---------------------------------------------------------------------------
// Config::default()
// ---------------------------------------------------------------------------

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            root_folder: crate::domain::DEFAULT_ROOT_FOLDER.to_string(),
            accept: "application/vnd.github+json".to_string(),
            api_version: "2022-11-28".to_string(),
            user_agent: concat!("codedepot/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for KeyringConfig {
    fn default() -> Self {
        Self {
            service: "codedepot".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"remote.timeout_secs"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- remote ---
        let base = self.remote.api_base_url.as_str();
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            errors.push(ValidationError {
                field: "remote.api_base_url".into(),
                message: format!("must be an http(s) URL, got '{base}'"),
            });
        }
        if Namespace::with_root(&self.remote.root_folder, AccessKey::generate()).is_err() {
            errors.push(ValidationError {
                field: "remote.root_folder".into(),
                message: format!(
                    "'{}' is not a valid folder path",
                    self.remote.root_folder
                ),
            });
        }
        if self.remote.accept.trim().is_empty() {
            errors.push(ValidationError {
                field: "remote.accept".into(),
                message: "must not be empty".into(),
            });
        }
        if self.remote.user_agent.trim().is_empty() {
            errors.push(ValidationError {
                field: "remote.user_agent".into(),
                message: "must not be empty".into(),
            });
        }
        if self.remote.timeout_secs == 0 {
            errors.push(ValidationError {
                field: "remote.timeout_secs".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        // --- keyring ---
        if self.keyring.service.trim().is_empty() {
            errors.push(ValidationError {
                field: "keyring.service".into(),
                message: "must not be empty".into(),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use codedepot_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .remote_api_base_url("http://localhost:8080")
///     .remote_root_folder("snippets")
///     .logging_level("debug")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // -- remote --

    pub fn remote_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.remote.api_base_url = url.into();
        self
    }

    pub fn remote_root_folder(mut self, folder: impl Into<String>) -> Self {
        self.config.remote.root_folder = folder.into();
        self
    }

    pub fn remote_accept(mut self, accept: impl Into<String>) -> Self {
        self.config.remote.accept = accept.into();
        self
    }

    pub fn remote_api_version(mut self, version: impl Into<String>) -> Self {
        self.config.remote.api_version = version.into();
        self
    }

    pub fn remote_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.remote.user_agent = agent.into();
        self
    }

    pub fn remote_timeout_secs(mut self, seconds: u64) -> Self {
        self.config.remote.timeout_secs = seconds;
        self
    }

    // -- logging --

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // -- keyring --

    pub fn keyring_service(mut self, service: impl Into<String>) -> Self {
        self.config.keyring.service = service.into();
        self
    }

    /// Consume the builder and return the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
