//! Runs every validator and consolidates their results.

use anyhow::Result;
use tracing::{debug, error, info};

use crate::config::RepositoryRequirements;
use crate::error::PatternError;
use crate::git::GitAccess;
use crate::validation::{BranchValidator, MessageValidator, ValidationResult, Validator};

/// Ordered set of validators run as one check.
pub struct ValidatorsCluster<'r> {
    validators: Vec<Box<dyn Validator + 'r>>,
}

impl<'r> ValidatorsCluster<'r> {
    /// Creates the branch and message validators for `requirements`.
    ///
    /// Fails before any commit is examined if either pattern is invalid.
    pub fn new(
        git: &'r dyn GitAccess,
        requirements: &RepositoryRequirements,
    ) -> Result<Self, PatternError> {
        let branch: Box<dyn Validator + 'r> = Box::new(BranchValidator::new(git, requirements)?);
        let message: Box<dyn Validator + 'r> = Box::new(MessageValidator::new(git, requirements)?);
        Ok(Self::with_validators(vec![branch, message]))
    }

    /// Creates a cluster from explicit validators, run in the given order.
    pub fn with_validators(validators: Vec<Box<dyn Validator + 'r>>) -> Self {
        Self { validators }
    }

    /// Runs all validators and concatenates their violations in invocation order.
    ///
    /// Every validator runs even when an earlier one reported violations.
    pub fn validate(&self) -> Result<ValidationResult> {
        debug!(
            "Started validation by {} validator(s)",
            self.validators.len()
        );

        let mut result = ValidationResult::passed();
        for validator in &self.validators {
            result = result.concat(validator.validate()?);
        }

        if result.is_ok() {
            info!("Validation result: {result}");
        } else {
            error!("Validation result: {result}");
        }
        Ok(result)
    }
}
