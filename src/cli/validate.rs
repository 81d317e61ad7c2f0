//! Validate command: checks the branch name and commit messages.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use crate::cli::args::{RequirementsArgs, SourceArgs};
use crate::cli::report::{self, OutputFormat};
use crate::config::ResolvedConfig;
use crate::error::GateError;
use crate::git::GitRepository;
use crate::validation::{ValidationResult, ValidatorsCluster};

/// Validate command options.
#[derive(Parser)]
pub struct ValidateCommand {
    /// Repository and configuration file location.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Requirement overrides.
    #[command(flatten)]
    pub requirements: RequirementsArgs,

    /// Output format: text (default), json, yaml.
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl ValidateCommand {
    /// Executes the validate command.
    pub fn execute(self) -> Result<()> {
        let output_format: OutputFormat = self.format.parse().unwrap_or_else(|()| {
            warn!("Unknown output format '{}', using text", self.format);
            OutputFormat::Text
        });

        info!("Started validation of {}", self.source.repo_dir().display());
        let (config, result) = self.run()?;

        println!("{}", report::render(&result, output_format)?);

        if config.fail_on_violations && !result.is_ok() {
            return Err(GateError::InvalidRepository(result).into());
        }
        Ok(())
    }

    /// Opens the repository, validates it and releases it before returning.
    fn run(self) -> Result<(ResolvedConfig, ValidationResult)> {
        let repo = GitRepository::open_at(self.source.repo_dir()).context(
            "Failed to open git repository. Make sure you're in a git repository.",
        )?;

        let config = self
            .source
            .load(repo.workdir(), self.requirements.into_layer())?;
        info!(
            "Injected configuration parameters: [fail_on_violations={}], [requirements={:?}]",
            config.fail_on_violations, config.requirements
        );

        let result = ValidatorsCluster::new(&repo, &config.requirements)?.validate()?;
        result.log_violations();
        Ok((config, result))
    }
}
