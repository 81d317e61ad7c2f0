//! Arguments shared by the commands that need requirements.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use crate::config::{ConfigSources, RequirementsFile, ResolvedConfig};

/// Where to find the repository and its configuration file.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Directory inside the repository to validate (defaults to the current directory).
    #[arg(long, value_name = "DIR", env = "COMMIT_GATE_REPO")]
    pub repo: Option<PathBuf>,

    /// Explicit configuration file (defaults to .commit-gate.yaml in the work tree root).
    #[arg(long, value_name = "FILE", env = "COMMIT_GATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ignores the user configuration file in the home directory.
    #[arg(long, env = "COMMIT_GATE_NO_USER_CONFIG")]
    pub no_user_config: bool,
}

impl SourceArgs {
    /// Returns the directory the repository is discovered from.
    pub fn repo_dir(&self) -> &Path {
        self.repo.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Loads the layered configuration for a repository work tree.
    pub fn load(
        &self,
        workdir: Option<&Path>,
        overrides: RequirementsFile,
    ) -> Result<ResolvedConfig> {
        let sources = ConfigSources::discover(workdir);
        let sources = match &self.config {
            Some(path) => sources.with_explicit_file(path.clone()),
            None => sources,
        };
        let sources = if self.no_user_config {
            sources.without_user_file()
        } else {
            sources
        };
        sources.load(overrides)
    }
}

/// Requirement overrides from flags or environment variables.
#[derive(Args, Debug, Default)]
pub struct RequirementsArgs {
    /// Regex the current branch name must match in full.
    #[arg(long, value_name = "REGEX", env = "COMMIT_GATE_ALLOWED_BRANCHES_REGEX")]
    pub allowed_branches_regex: Option<String>,

    /// Regex every commit summary must match in full.
    #[arg(long, value_name = "REGEX", env = "COMMIT_GATE_ALLOWED_COMMIT_MESSAGES_REGEX")]
    pub allowed_commit_messages_regex: Option<String>,

    /// Matches branch names and messages case sensitively (default: true).
    #[arg(long, value_name = "BOOL", env = "COMMIT_GATE_CASE_SENSITIVE")]
    pub case_sensitive: Option<bool>,

    /// Commit to start message checks from, inclusive (default: whole history).
    #[arg(long, value_name = "HASH", env = "COMMIT_GATE_START_COMMIT_HASH")]
    pub start_commit_hash: Option<String>,

    /// Skips commits with two or more parents (default: true).
    #[arg(long, value_name = "BOOL", env = "COMMIT_GATE_IGNORE_MERGE_COMMITS")]
    pub ignore_merge_commits: Option<bool>,

    /// Fails the run when violations are found (default: true).
    #[arg(long, value_name = "BOOL", env = "COMMIT_GATE_FAIL_ON_VIOLATIONS")]
    pub fail_on_violations: Option<bool>,
}

impl RequirementsArgs {
    /// Converts the flags into the highest-precedence configuration layer.
    pub fn into_layer(self) -> RequirementsFile {
        RequirementsFile {
            allowed_branches_regex: self.allowed_branches_regex,
            allowed_commit_messages_regex: self.allowed_commit_messages_regex,
            case_sensitive: self.case_sensitive,
            start_commit_hash: self.start_commit_hash,
            ignore_merge_commits: self.ignore_merge_commits,
            fail_on_violations: self.fail_on_violations,
        }
    }
}
