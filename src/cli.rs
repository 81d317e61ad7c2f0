//! CLI interface for commit-gate.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod args;
pub mod config;
pub mod report;
pub mod validate;

/// commit-gate: Validates branch names and commit messages against regex policies.
#[derive(Parser)]
#[command(name = "commit-gate")]
#[command(
    about = "Validates branch names and commit messages against regex policies",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Validates the current branch and commit messages.
    Validate(validate::ValidateCommand),
    /// Configuration information.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Validate(validate_cmd) => validate_cmd.execute(),
            Commands::Config(config_cmd) => config_cmd.execute(),
        }
    }
}
