//! Key commands - Manage the access key that selects the user's namespace
//!
//! Provides the `codedepot key` CLI subcommands:
//! - `generate` - Creates and stores a fresh random key
//! - `login`    - Stores an existing key
//! - `logout`   - Forgets the stored key
//! - `show`     - Prints the stored key

use anyhow::{Context, Result};
use clap::Subcommand;
use codedepot_core::domain::AccessKey;
use codedepot_core::ports::{load_access_key, ACCESS_KEY_KEY};
use tracing::info;

use super::CommandContext;

#[derive(Debug, Subcommand)]
pub enum KeyCommand {
    /// Generate a new access key
    Generate,
    /// Use an existing access key
    Login {
        /// The access key
        key: String,
    },
    /// Forget the stored access key
    Logout,
    /// Show the stored access key
    Show,
}

impl KeyCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            KeyCommand::Generate => store_key(ctx, AccessKey::generate(), true),
            KeyCommand::Login { key } => store_key(ctx, parse_login_key(key)?, false),
            KeyCommand::Logout => execute_logout(ctx),
            KeyCommand::Show => execute_show(ctx),
        }
    }
}

/// Validates a key typed by the user; the error is the message to show
fn parse_login_key(raw: &str) -> Result<AccessKey> {
    let raw = raw.trim();
    if raw.is_empty() {
        anyhow::bail!("Please enter your access key.");
    }
    raw.parse::<AccessKey>()
        .context("Invalid access key. Please try again.")
}

fn store_key(ctx: &CommandContext, key: AccessKey, generated: bool) -> Result<()> {
    let formatter = ctx.formatter();
    ctx.settings().set(ACCESS_KEY_KEY, key.as_str())?;
    info!(key = %key.masked(), generated, "Stored access key");

    if ctx.is_json() {
        formatter.print_json(&serde_json::json!({
            "success": true,
            "generated": generated,
            "access_key": key.as_str(),
        }));
    } else if generated {
        formatter.success("Key Generated Successfully!");
        formatter.info(&format!("Your access key: {key}"));
        formatter.info("Keep it safe: it is the only way back to your files.");
    } else {
        formatter.success("Login Successful!");
        formatter.info("Welcome back to Code Depot.");
    }
    Ok(())
}

fn execute_logout(ctx: &CommandContext) -> Result<()> {
    let formatter = ctx.formatter();
    ctx.settings().remove(ACCESS_KEY_KEY)?;
    info!("Removed access key");

    if ctx.is_json() {
        formatter.print_json(&serde_json::json!({"success": true}));
    } else {
        formatter.success("Logged Out");
        formatter.info("You have been logged out successfully.");
    }
    Ok(())
}

fn execute_show(ctx: &CommandContext) -> Result<()> {
    let formatter = ctx.formatter();
    let key = load_access_key(ctx.settings().as_ref())?;

    if ctx.is_json() {
        formatter.print_json(&serde_json::json!({
            "access_key": key.as_ref().map(AccessKey::as_str),
        }));
        return Ok(());
    }

    match key {
        Some(key) => formatter.success(&format!("Access key: {key}")),
        None => {
            formatter.warn("Not logged in");
            formatter.info("Run 'codedepot key generate' or 'codedepot key login <key>'");
        }
    }
    Ok(())
}
