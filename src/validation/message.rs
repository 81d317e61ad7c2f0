//! Commit message check.

use anyhow::Result;
use tracing::{debug, info};

use crate::config::RepositoryRequirements;
use crate::error::PatternError;
use crate::git::{CommitRecord, GitAccess};
use crate::validation::{CommitRangeResolver, Pattern, ValidationResult, Validator, Violation};

/// Checks the summary line of every commit in range against the allowed-message pattern.
pub struct MessageValidator<'r> {
    git: &'r dyn GitAccess,
    start_commit_hash: String,
    allowed_pattern: Pattern,
    ignore_merge_commits: bool,
}

impl<'r> MessageValidator<'r> {
    /// Creates a validator, compiling the allowed-message pattern.
    pub fn new(
        git: &'r dyn GitAccess,
        requirements: &RepositoryRequirements,
    ) -> Result<Self, PatternError> {
        let allowed_pattern = Pattern::new(
            &requirements.allowed_commit_messages_regex,
            requirements.case_sensitive,
        )?;
        debug!(
            "Initialized message validator with pattern '{}', start commit '{}', ignore merge commits: '{}'",
            allowed_pattern, requirements.start_commit_hash, requirements.ignore_merge_commits
        );

        Ok(Self {
            git,
            start_commit_hash: requirements.start_commit_hash.clone(),
            allowed_pattern,
            ignore_merge_commits: requirements.ignore_merge_commits,
        })
    }

    fn consider_merge_commits(&self, commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
        if !self.ignore_merge_commits {
            return commits;
        }

        debug!("Excluding merge commits");
        let before = commits.len();
        let commits: Vec<CommitRecord> = commits.into_iter().filter(|c| !c.is_merge()).collect();
        debug!(
            "Number of commits before excluding merge commits: '{}'. After exclusion: '{}'",
            before,
            commits.len()
        );
        commits
    }

    fn validate_commit(&self, commit: &CommitRecord) -> Option<Violation> {
        let readable_time = commit.readable_time();
        debug!("Validating {commit}. [{readable_time}]");

        let matches = self.allowed_pattern.matches(&commit.summary);
        debug!(
            "Does this message: '{}' from this commit: '{}' match this pattern: '{}'? Answer: '{}'",
            commit.summary, commit, self.allowed_pattern, matches
        );

        (!matches).then(|| {
            Violation::new(format!(
                "This message: '{}' from this commit: '{}' [{}] does not match this pattern: '{}'",
                commit.summary, commit, readable_time, self.allowed_pattern
            ))
        })
    }
}

impl Validator for MessageValidator<'_> {
    fn name(&self) -> &'static str {
        "message"
    }

    fn validate(&self) -> Result<ValidationResult> {
        info!("Started validation by {} validator", self.name());
        let commits = CommitRangeResolver::new(self.git).resolve(&self.start_commit_hash)?;
        let commits = self.consider_merge_commits(commits);

        debug!("Validating this number of commits: '{}'", commits.len());
        let result: ValidationResult = commits
            .iter()
            .filter_map(|commit| self.validate_commit(commit))
            .collect();
        debug!("Validated by {} validator. {result}", self.name());
        Ok(result)
    }
}
