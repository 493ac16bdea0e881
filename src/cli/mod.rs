//! Command-line interface.

pub mod apply;
pub mod completions;
pub mod context;
pub mod destroy;
pub mod init;
pub mod output;
pub mod plan;
pub mod refresh;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Envsync - Declarative environment variables for hosted deployments.
#[derive(Parser)]
#[command(
    name = "envsync",
    about = "Reconcile declared environment variables against a remote",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to envsync.toml
    #[arg(short, long, global = true, env = "ENVSYNC_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Write a new envsync.toml
    Init {
        /// Project identifier
        #[arg(short, long)]
        project: Option<String>,
        /// Team identifier
        #[arg(short, long)]
        team: Option<String>,
    },

    /// Show the changes apply would make
    Plan,

    /// Reconcile the remote with the declared variables
    Apply {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Rebuild recorded state from the remote
    Refresh,

    /// Delete every recorded variable from the remote
    Destroy {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show quick status overview
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command, config: Option<PathBuf>) -> crate::error::Result<()> {
    use Command::*;

    let config_path = config.unwrap_or_else(crate::core::config::Config::default_path);

    match command {
        Init { project, team } => init::execute(&config_path, project, team),
        Plan => plan::execute(&config_path),
        Apply { yes } => apply::execute(&config_path, yes),
        Refresh => refresh::execute(&config_path),
        Destroy { yes } => destroy::execute(&config_path, yes),
        Status => status::execute(&config_path),
        Completions { shell } => completions::execute(shell),
    }
}
