//! Files commands - List, show, save, create and delete namespace files
//!
//! Every command first loads the namespace through the editor session, so
//! saves carry the descriptor read in the same invocation.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use codedepot_core::domain::{FileName, RemoteFile};
use codedepot_sync::session::EditorSession;

use super::CommandContext;

#[derive(Debug, Subcommand)]
pub enum FilesCommand {
    /// List files in your namespace
    List,
    /// Print a file's content
    Show {
        /// File name
        name: String,
    },
    /// Save content to a file, creating it if needed
    Save {
        /// File name
        name: String,
        /// Read content from this path instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Create a new empty file
    New {
        /// File name
        name: String,
    },
    /// Delete a file
    Delete {
        /// File name
        name: String,
    },
}

impl FilesCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let mut session = ctx.session()?;
        session.load().await?;

        match self {
            FilesCommand::List => execute_list(ctx, &session),
            FilesCommand::Show { name } => execute_show(ctx, &session, name),
            FilesCommand::Save { name, file } => {
                let content = read_content(file.as_deref())?;
                execute_save(&mut session, name, content).await
            }
            FilesCommand::New { name } => execute_new(&mut session, name).await,
            FilesCommand::Delete { name } => {
                let name = parse_name(name)?;
                session.delete(&name).await?;
                Ok(())
            }
        }
    }
}

fn execute_list(ctx: &CommandContext, session: &EditorSession) -> Result<()> {
    let formatter = ctx.formatter();
    let files = session.engine().files();

    if ctx.is_json() {
        let entries: Vec<serde_json::Value> = files.iter().map(file_json).collect();
        formatter.print_json(&serde_json::json!({
            "namespace": session.engine().namespace().to_string(),
            "files": entries,
        }));
        return Ok(());
    }

    if files.is_empty() {
        formatter.info("No files yet. Create one with 'codedepot files new <name>'");
        return Ok(());
    }

    formatter.success(&format!(
        "{} file{} in {}",
        files.len(),
        if files.len() == 1 { "" } else { "s" },
        session.engine().namespace()
    ));
    for file in files.iter() {
        formatter.info(&format!(
            "{:<32} {:<12} {} bytes",
            file.name().as_str(),
            file.language().as_str(),
            file.content().len()
        ));
    }
    Ok(())
}

fn execute_show(ctx: &CommandContext, session: &EditorSession, name: &str) -> Result<()> {
    let name = parse_name(name)?;
    let file = session
        .engine()
        .files()
        .get(&name)
        .with_context(|| format!("No file named '{name}'"))?;

    if ctx.is_json() {
        let mut json = file_json(file);
        json["content"] = serde_json::Value::String(file.content().to_string());
        ctx.formatter().print_json(&json);
    } else {
        print!("{}", file.content());
    }
    Ok(())
}

async fn execute_save(session: &mut EditorSession, name: &str, content: String) -> Result<()> {
    let file_name = parse_name(name)?;
    if session.engine().files().contains(&file_name) {
        session.open(&file_name)?;
        session.edit(content)?;
    } else {
        session.new_file(name, &content).await?;
    }
    session.save_active().await?;
    Ok(())
}

async fn execute_new(session: &mut EditorSession, name: &str) -> Result<()> {
    let file_name = parse_name(name)?;
    if session.engine().files().contains(&file_name) {
        anyhow::bail!("A file named '{file_name}' already exists");
    }
    session.new_file(name, "").await?;
    session.save_active().await?;
    Ok(())
}

fn parse_name(name: &str) -> Result<FileName> {
    FileName::new(name.trim().to_string()).with_context(|| format!("Invalid file name '{name}'"))
}

fn file_json(file: &RemoteFile) -> serde_json::Value {
    serde_json::json!({
        "name": file.name().as_str(),
        "language": file.language().as_str(),
        "state": file.state(),
        "sha": file.sha().map(|s| s.as_str()),
        "size": file.content().len(),
    })
}

/// Reads the content to save from a path, or from stdin when none is given
fn read_content(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read content from stdin")?;
            Ok(content)
        }
    }
}
