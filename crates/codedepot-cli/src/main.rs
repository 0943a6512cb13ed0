//! Code Depot CLI - Command-line interface for Code Depot
//!
//! Provides commands for:
//! - Storing the GitHub token and repository
//! - Generating or entering the access key that selects a namespace
//! - Listing, reading, saving and deleting namespace files
//! - Viewing and editing the configuration file

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use codedepot_core::config::Config;
use codedepot_sync::session::SessionError;
use codedepot_sync::SyncError;
use tracing_subscriber::EnvFilter;

mod commands;
mod notifier;
mod output;
mod settings;

use commands::{
    auth::AuthCommand, config::ConfigCommand, files::FilesCommand, key::KeyCommand,
    CommandContext,
};
use output::{get_formatter, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "codedepot", version, about = "Keep text files in a GitHub repository")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// GitHub token and repository
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Access key management
    #[command(subcommand)]
    Key(KeyCommand),
    /// Work with files in your namespace
    #[command(subcommand)]
    Files(FilesCommand),
    /// View and manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);

    // Setup tracing; -v overrides the configured level, RUST_LOG overrides both
    let level = match cli.verbose {
        0 => Config::load_or_default(&config_path).logging.level,
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let ctx = CommandContext::new(format, config_path);

    let result = match &cli.command {
        Commands::Auth(cmd) => cmd.execute(&ctx).await,
        Commands::Key(cmd) => cmd.execute(&ctx).await,
        Commands::Files(cmd) => cmd.execute(&ctx).await,
        Commands::Config(cmd) => cmd.execute(&ctx).await,
    };

    if let Err(e) = result {
        let formatter = get_formatter(cli.json);
        match e.downcast_ref::<SessionError>() {
            // Remote failures were already reported through the notifier
            Some(SessionError::Sync(sync)) if !matches!(sync, SyncError::Domain(_)) => {
                if sync.requires_reconfiguration() {
                    formatter.info("Run 'codedepot auth set --token <token> --repo <owner/repo>'");
                }
            }
            _ => formatter.error(&format!("{e:#}")),
        }
        std::process::exit(1);
    }
    Ok(())
}
