//! CLI interface module

pub mod commands;

use std::fmt;

use crate::cli::Commands;
use commands::{check_username, config_generate, issue_token};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ValidationError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ValidationError(msg) => format!("Validation error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ValidationError(msg) => {
                format!("{} {}", "Validation error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::OpenLinkError> for CliError {
    fn from(err: crate::errors::OpenLinkError) -> Self {
        use crate::errors::OpenLinkError;
        match err {
            OpenLinkError::Validation(msg) | OpenLinkError::Conflict(msg) => {
                CliError::ValidationError(msg)
            }
            OpenLinkError::Persistence(_)
            | OpenLinkError::DatabaseConfig(_)
            | OpenLinkError::DatabaseConnection(_) => CliError::StorageError(err.to_string()),
            other => CliError::CommandError(other.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
///
/// `Serve` is dispatched by the binary, not here.
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::GenerateConfig { output_path, force } => config_generate(output_path, force),
        Commands::CheckUsername { username, offline } => check_username(username, offline).await,
        Commands::IssueToken {
            user,
            email,
            name,
            minutes,
        } => issue_token(user, email, name, minutes),
        Commands::Serve => Err(CliError::CommandError(
            "serve is not a management command".to_string(),
        )),
    }
}
