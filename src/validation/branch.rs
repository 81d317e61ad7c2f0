//! Current branch name check.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::RepositoryRequirements;
use crate::error::PatternError;
use crate::git::GitAccess;
use crate::validation::{Pattern, ValidationResult, Validator, Violation};

/// Checks the checked-out branch name against the allowed-branch pattern.
pub struct BranchValidator<'r> {
    git: &'r dyn GitAccess,
    allowed_pattern: Pattern,
}

impl<'r> BranchValidator<'r> {
    /// Creates a validator, compiling the allowed-branch pattern.
    pub fn new(
        git: &'r dyn GitAccess,
        requirements: &RepositoryRequirements,
    ) -> Result<Self, PatternError> {
        let allowed_pattern = Pattern::new(
            &requirements.allowed_branches_regex,
            requirements.case_sensitive,
        )?;
        debug!("Initialized branch validator with pattern '{allowed_pattern}'");

        Ok(Self {
            git,
            allowed_pattern,
        })
    }
}

impl Validator for BranchValidator<'_> {
    fn name(&self) -> &'static str {
        "branch"
    }

    fn validate(&self) -> Result<ValidationResult> {
        info!("Started validation by {} validator", self.name());
        let current_branch = self
            .git
            .current_branch_name()
            .context("Failed to determine the current branch name")?;
        debug!("Current branch name: '{current_branch}'");

        let does_match = self.allowed_pattern.matches(&current_branch);
        info!(
            "Does this branch name: '{}' match this pattern: '{}'? Answer: '{}'",
            current_branch, self.allowed_pattern, does_match
        );

        let result = if does_match {
            ValidationResult::passed()
        } else {
            ValidationResult::from(Violation::new(format!(
                "This branch name: '{}' does not match this pattern: '{}'",
                current_branch, self.allowed_pattern
            )))
        };
        debug!("Validated by {} validator. {result}", self.name());
        Ok(result)
    }
}
