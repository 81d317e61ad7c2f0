//! Repository requirements and their layered configuration sources.
//!
//! Requirements are assembled from, lowest precedence first: built-in
//! defaults, `$HOME/.commit-gate/config.yaml`, the repository's
//! `.commit-gate.yaml` (or an explicit file), and command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pattern that allows every branch name and message.
pub const MATCH_EVERYTHING: &str = ".*";

/// File name of the per-repository configuration, relative to the work tree root.
pub const REPOSITORY_CONFIG_FILE: &str = ".commit-gate.yaml";

/// Policy a repository must satisfy. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRequirements {
    /// Regex every current branch name must match in full.
    pub allowed_branches_regex: String,
    /// Regex every checked commit summary must match in full.
    pub allowed_commit_messages_regex: String,
    /// Whether both patterns match case sensitively.
    pub case_sensitive: bool,
    /// First commit to check; empty means the entire history.
    pub start_commit_hash: String,
    /// Whether commits with two or more parents are skipped.
    pub ignore_merge_commits: bool,
}

impl Default for RepositoryRequirements {
    fn default() -> Self {
        Self {
            allowed_branches_regex: MATCH_EVERYTHING.to_string(),
            allowed_commit_messages_regex: MATCH_EVERYTHING.to_string(),
            case_sensitive: true,
            start_commit_hash: String::new(),
            ignore_merge_commits: true,
        }
    }
}

/// Fully resolved configuration of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    /// Whether violations make the run fail.
    pub fail_on_violations: bool,
    /// The requirements to validate against.
    #[serde(flatten)]
    pub requirements: RepositoryRequirements,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            fail_on_violations: true,
            requirements: RepositoryRequirements::default(),
        }
    }
}

/// One configuration layer; unset fields defer to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequirementsFile {
    /// Allowed branch name regex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_branches_regex: Option<String>,
    /// Allowed commit message regex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_commit_messages_regex: Option<String>,
    /// Case sensitivity of both patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
    /// Start commit hash, full or abbreviated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_commit_hash: Option<String>,
    /// Whether merge commits are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_merge_commits: Option<bool>,
    /// Whether violations make the run fail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on_violations: Option<bool>,
}

impl RequirementsFile {
    /// Loads a layer from a YAML file, or an empty layer if the file does not exist.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!("No configuration file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))
    }

    /// Parses a layer from YAML text. An empty document is an empty layer.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to deserialize YAML")
    }

    /// Returns this layer with every field set in `higher` replaced by it.
    #[must_use]
    pub fn overlay(self, higher: Self) -> Self {
        Self {
            allowed_branches_regex: higher.allowed_branches_regex.or(self.allowed_branches_regex),
            allowed_commit_messages_regex: higher
                .allowed_commit_messages_regex
                .or(self.allowed_commit_messages_regex),
            case_sensitive: higher.case_sensitive.or(self.case_sensitive),
            start_commit_hash: higher.start_commit_hash.or(self.start_commit_hash),
            ignore_merge_commits: higher.ignore_merge_commits.or(self.ignore_merge_commits),
            fail_on_violations: higher.fail_on_violations.or(self.fail_on_violations),
        }
    }

    /// Fills unset fields with the built-in defaults.
    pub fn resolve(self) -> ResolvedConfig {
        let defaults = ResolvedConfig::default();
        ResolvedConfig {
            fail_on_violations: self
                .fail_on_violations
                .unwrap_or(defaults.fail_on_violations),
            requirements: RepositoryRequirements {
                allowed_branches_regex: self
                    .allowed_branches_regex
                    .unwrap_or(defaults.requirements.allowed_branches_regex),
                allowed_commit_messages_regex: self
                    .allowed_commit_messages_regex
                    .unwrap_or(defaults.requirements.allowed_commit_messages_regex),
                case_sensitive: self
                    .case_sensitive
                    .unwrap_or(defaults.requirements.case_sensitive),
                start_commit_hash: self.start_commit_hash.unwrap_or_default(),
                ignore_merge_commits: self
                    .ignore_merge_commits
                    .unwrap_or(defaults.requirements.ignore_merge_commits),
            },
        }
    }
}

/// Where the file-based configuration layers come from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// User-wide configuration file.
    pub user_file: Option<PathBuf>,
    /// Repository configuration file.
    pub repository_file: Option<PathBuf>,
    /// Whether `repository_file` was named explicitly and so must exist.
    pub repository_file_required: bool,
}

impl ConfigSources {
    /// Default sources: the user file and `.commit-gate.yaml` in `workdir`, if any.
    pub fn discover(workdir: Option<&Path>) -> Self {
        Self {
            user_file: user_config_path(),
            repository_file: workdir.map(|dir| dir.join(REPOSITORY_CONFIG_FILE)),
            repository_file_required: false,
        }
    }

    /// Replaces the repository file with an explicitly requested one.
    #[must_use]
    pub fn with_explicit_file(mut self, path: PathBuf) -> Self {
        self.repository_file = Some(path);
        self.repository_file_required = true;
        self
    }

    /// Drops the user file layer.
    #[must_use]
    pub fn without_user_file(mut self) -> Self {
        self.user_file = None;
        self
    }

    /// Loads all file layers, applies `overrides` on top and resolves defaults.
    pub fn load(&self, overrides: RequirementsFile) -> Result<ResolvedConfig> {
        let mut layered = RequirementsFile::default();

        if let Some(path) = &self.user_file {
            layered = layered.overlay(RequirementsFile::load_from_path(path)?);
        }

        if let Some(path) = &self.repository_file {
            if self.repository_file_required && !path.exists() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            layered = layered.overlay(RequirementsFile::load_from_path(path)?);
        }

        let resolved = layered.overlay(overrides).resolve();
        debug!("Resolved configuration: {resolved:?}");
        Ok(resolved)
    }
}

/// Returns the user-wide configuration path.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".commit-gate").join("config.yaml"))
}
