//! Configuration-related CLI commands.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::cli::args::{RequirementsArgs, SourceArgs};
use crate::config::ResolvedConfig;
use crate::git::GitRepository;

/// Configuration operations.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Shows the effective requirements after layering all sources.
    Show(ShowCommand),
}

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {
    /// Repository and configuration file location.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Requirement overrides.
    #[command(flatten)]
    pub requirements: RequirementsArgs,
}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            ConfigSubcommands::Show(show_cmd) => show_cmd.execute(),
        }
    }
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<()> {
        let config = self.resolve()?;
        let yaml = serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
        print!("{yaml}");
        Ok(())
    }

    fn resolve(self) -> Result<ResolvedConfig> {
        // Outside a repository only the user file and the flags apply
        let workdir = match GitRepository::open_at(self.source.repo_dir()) {
            Ok(repo) => repo.workdir().map(std::path::Path::to_path_buf),
            Err(e) => {
                debug!("No repository configuration: {e:#}");
                None
            }
        };
        self.source
            .load(workdir.as_deref(), self.requirements.into_layer())
    }
}
