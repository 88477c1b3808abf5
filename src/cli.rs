//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// OpenLink - link-in-bio backend
#[derive(Parser)]
#[command(name = "openlink")]
#[command(version)]
#[command(about = "Link-in-bio backend: usernames, ordered links, public pages", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Generate example configuration file
    GenerateConfig {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Validate a username and check whether it is still free
    CheckUsername {
        username: String,

        /// Only run the format/length/reserved checks
        #[arg(long)]
        offline: bool,
    },

    /// Mint a development access token signed with the configured secret
    IssueToken {
        /// Owner id placed in the `sub` claim
        #[arg(long)]
        user: String,

        #[arg(long)]
        email: Option<String>,

        /// Full name placed in `user_metadata.full_name`
        #[arg(long)]
        name: Option<String>,

        /// Lifetime in minutes (default: auth.issued_token_minutes)
        #[arg(long)]
        minutes: Option<u64>,
    },
}
