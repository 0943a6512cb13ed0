//! Auth commands - Store, inspect and clear the GitHub credentials
//!
//! Provides the `codedepot auth` CLI subcommands which:
//! 1. `set`    - Validates and stores the access token and `owner/repo`
//! 2. `status` - Shows whether both values are configured
//! 3. `clear`  - Removes both values from the keyring

use anyhow::{Context, Result};
use clap::Subcommand;
use codedepot_core::domain::RepositoryId;
use codedepot_core::ports::Credentials;
use tracing::info;

use super::CommandContext;

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Store a GitHub personal access token and repository
    Set {
        /// Personal access token with contents read/write permission
        #[arg(long)]
        token: String,
        /// Repository in owner/repo form
        #[arg(long)]
        repo: String,
    },
    /// Check whether credentials are configured
    Status,
    /// Remove stored credentials
    Clear,
}

impl AuthCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            AuthCommand::Set { token, repo } => execute_set(ctx, token, repo),
            AuthCommand::Status => execute_status(ctx),
            AuthCommand::Clear => execute_clear(ctx),
        }
    }
}

fn execute_set(ctx: &CommandContext, token: &str, repo: &str) -> Result<()> {
    let formatter = ctx.formatter();

    let (token, repository) = parse_auth_inputs(token, repo)?;

    Credentials::new(token, repository.clone()).store(ctx.settings().as_ref())?;
    info!(repository = %repository, "Stored GitHub credentials");

    if ctx.is_json() {
        formatter.print_json(&serde_json::json!({
            "success": true,
            "repository": repository.to_string(),
        }));
    } else {
        formatter.success("Settings saved successfully!");
        formatter.info(&format!("Repository: {repository}"));
    }
    Ok(())
}

fn execute_status(ctx: &CommandContext) -> Result<()> {
    let formatter = ctx.formatter();
    let credentials = Credentials::load(ctx.settings().as_ref())?;

    if ctx.is_json() {
        formatter.print_json(&serde_json::json!({
            "configured": credentials.is_some(),
            "repository": credentials.as_ref().map(|c| c.repository().to_string()),
        }));
        return Ok(());
    }

    match credentials {
        Some(credentials) => {
            formatter.success("GitHub settings configured");
            formatter.info(&format!("Repository: {}", credentials.repository()));
            formatter.info(&format!("Token:      {}", mask_token(credentials.token())));
        }
        None => {
            formatter.warn("GitHub settings are not configured");
            formatter.info("Run 'codedepot auth set --token <token> --repo <owner/repo>'");
        }
    }
    Ok(())
}

fn execute_clear(ctx: &CommandContext) -> Result<()> {
    let formatter = ctx.formatter();
    Credentials::clear(ctx.settings().as_ref())?;
    info!("Cleared GitHub credentials");

    if ctx.is_json() {
        formatter.print_json(&serde_json::json!({"success": true}));
    } else {
        formatter.success("GitHub settings removed");
    }
    Ok(())
}

/// Validates the `set` inputs; the error is the message to show
fn parse_auth_inputs<'a>(token: &'a str, repo: &str) -> Result<(&'a str, RepositoryId)> {
    let token = token.trim();
    if token.is_empty() || repo.trim().is_empty() {
        anyhow::bail!("Please fill in all fields");
    }
    let repository = RepositoryId::new(repo.trim().to_string())
        .context("Repository format should be: username/repository-name")?;
    Ok((token, repository))
}

/// Keeps the token prefix (e.g. `ghp_`) and the last four characters
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
