//! Config command - View and manage Code Depot configuration
//!
//! Provides the `codedepot config` CLI command which:
//! 1. Shows the current configuration (YAML or JSON)
//! 2. Sets individual configuration values via dot-notation keys
//! 3. Validates the configuration file and reports errors

use anyhow::{Context, Result};
use clap::Subcommand;
use codedepot_core::config::Config;
use tracing::info;

use super::CommandContext;

/// Keys accepted by `config set`, with a short description
const SUPPORTED_KEYS: &[(&str, &str)] = &[
    ("remote.api_base_url", "GitHub API base URL"),
    ("remote.root_folder", "Repository folder holding all namespaces"),
    ("remote.accept", "Accept header media type"),
    ("remote.api_version", "X-GitHub-Api-Version header"),
    ("remote.user_agent", "User-Agent header"),
    ("remote.timeout_secs", "Request timeout in seconds"),
    ("logging.level", "trace|debug|info|warn|error"),
    ("keyring.service", "Keyring service name for stored settings"),
];

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "remote.root_folder")
        key: String,
        /// New value
        value: String,
    },
    /// Validate configuration file
    Validate,
}

impl ConfigCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            ConfigCommand::Show => execute_show(ctx),
            ConfigCommand::Set { key, value } => execute_set(ctx, key, value),
            ConfigCommand::Validate => execute_validate(ctx),
        }
    }
}

fn execute_show(ctx: &CommandContext) -> Result<()> {
    let formatter = ctx.formatter();
    let config = ctx.config();

    info!(config_path = %ctx.config_path.display(), "Showing configuration");

    if ctx.is_json() {
        let json =
            serde_json::to_value(&config).context("Failed to serialize configuration to JSON")?;
        formatter.print_json(&json);
    } else {
        formatter.success(&format!("Configuration ({})", ctx.config_path.display()));
        formatter.info("");
        let yaml =
            serde_yaml::to_string(&config).context("Failed to serialize configuration to YAML")?;
        for line in yaml.lines() {
            formatter.info(line);
        }
    }
    Ok(())
}

fn execute_set(ctx: &CommandContext, key: &str, value: &str) -> Result<()> {
    let formatter = ctx.formatter();
    let mut config = ctx.config();

    info!(key, value, "Setting configuration value");

    if let Err(e) = apply_config_value(&mut config, key, value) {
        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "success": false,
                "key": key,
                "error": e.to_string(),
            }));
        } else {
            formatter.error(&format!("Failed to set '{key}': {e}"));
            formatter.info("");
            formatter.info("Supported keys:");
            for (name, description) in SUPPORTED_KEYS {
                formatter.info(&format!("  {name:<24} - {description}"));
            }
        }
        return Ok(());
    }

    let errors: Vec<String> = config.validate().iter().map(|e| e.to_string()).collect();
    if !errors.is_empty() {
        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "success": false,
                "key": key,
                "value": value,
                "errors": errors,
            }));
        } else {
            formatter.error(&format!("Invalid value for '{key}': {}", errors.join("; ")));
        }
        return Ok(());
    }

    config
        .save(&ctx.config_path)
        .context("Failed to write configuration file")?;

    if ctx.is_json() {
        formatter.print_json(&serde_json::json!({
            "success": true,
            "key": key,
            "value": value,
            "config_path": ctx.config_path.display().to_string(),
        }));
    } else {
        formatter.success(&format!("Set {key} = {value}"));
        formatter.info(&format!("Saved to {}", ctx.config_path.display()));
    }
    Ok(())
}

fn execute_validate(ctx: &CommandContext) -> Result<()> {
    let formatter = ctx.formatter();
    let path = &ctx.config_path;

    let config = match Config::load(path) {
        Ok(cfg) => cfg,
        Err(_) if !path.exists() => {
            if ctx.is_json() {
                formatter.print_json(&serde_json::json!({
                    "valid": true,
                    "config_path": path.display().to_string(),
                    "errors": [],
                    "defaults": true,
                }));
            } else {
                formatter.info(&format!("Configuration file not found at {}", path.display()));
                formatter.info("Using default configuration. Run 'codedepot config set <key> <value>' to create one.");
            }
            return Ok(());
        }
        Err(e) => {
            if ctx.is_json() {
                formatter.print_json(&serde_json::json!({
                    "valid": false,
                    "config_path": path.display().to_string(),
                    "errors": [format!("Failed to parse configuration: {e}")],
                }));
            } else {
                formatter.error(&format!("Failed to parse configuration: {e}"));
                formatter.info(&format!("File: {}", path.display()));
            }
            return Ok(());
        }
    };

    let errors = config.validate();
    if ctx.is_json() {
        let error_strings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        formatter.print_json(&serde_json::json!({
            "valid": errors.is_empty(),
            "config_path": path.display().to_string(),
            "errors": error_strings,
        }));
    } else if errors.is_empty() {
        formatter.success("Configuration is valid");
        formatter.info(&format!("File: {}", path.display()));
    } else {
        formatter.error(&format!(
            "Configuration has {} error{}:",
            errors.len(),
            if errors.len() == 1 { "" } else { "s" }
        ));
        for error in &errors {
            formatter.info(&format!("  {} - {}", error.field, error.message));
        }
    }
    Ok(())
}

/// Apply a dot-notation key/value pair to a Config struct
fn apply_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "remote.api_base_url" => config.remote.api_base_url = value.to_string(),
        "remote.root_folder" => config.remote.root_folder = value.to_string(),
        "remote.accept" => config.remote.accept = value.to_string(),
        "remote.api_version" => config.remote.api_version = value.to_string(),
        "remote.user_agent" => config.remote.user_agent = value.to_string(),
        "remote.timeout_secs" => {
            config.remote.timeout_secs = value
                .parse::<u64>()
                .context("Expected a positive integer for remote.timeout_secs")?;
        }
        "logging.level" => config.logging.level = value.to_string(),
        "keyring.service" => config.keyring.service = value.to_string(),
        _ => anyhow::bail!("Unknown configuration key: '{}'", key),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_remote_values() {
        let mut config = Config::default();
        apply_config_value(&mut config, "remote.root_folder", "snippets").unwrap();
        apply_config_value(&mut config, "remote.timeout_secs", "5").unwrap();
        assert_eq!(config.remote.root_folder, "snippets");
        assert_eq!(config.remote.timeout_secs, 5);
    }

    #[test]
    fn test_apply_invalid_number() {
        let mut config = Config::default();
        assert!(apply_config_value(&mut config, "remote.timeout_secs", "soon").is_err());
    }

    #[test]
    fn test_apply_unknown_key() {
        let mut config = Config::default();
        let err = apply_config_value(&mut config, "sync.root", "/tmp").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn test_every_supported_key_applies() {
        for (key, _) in SUPPORTED_KEYS {
            let mut config = Config::default();
            let value = if *key == "remote.timeout_secs" { "10" } else { "x" };
            apply_config_value(&mut config, key, value).unwrap();
        }
    }

    #[test]
    fn test_set_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codedepot").join("config.yaml");
        let ctx = CommandContext::new(crate::output::OutputFormat::Json, path.clone());

        execute_set(&ctx, "remote.root_folder", "depot/files").unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.remote.root_folder, "depot/files");
    }

    #[test]
    fn test_set_rejects_invalid_value_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let ctx = CommandContext::new(crate::output::OutputFormat::Json, path.clone());

        execute_set(&ctx, "logging.level", "loud").unwrap();
        assert!(!path.exists());
    }
}
