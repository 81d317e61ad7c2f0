//! Typed errors surfaced by validation runs.

use thiserror::Error;

use crate::validation::ValidationResult;

/// A branch or message pattern that could not be compiled.
#[derive(Error, Debug)]
pub enum PatternError {
    /// The regex syntax is invalid.
    #[error("Invalid pattern '{pattern}': {source}")]
    Invalid {
        /// The pattern text as configured.
        pattern: String,
        /// The underlying regex compilation error.
        #[source]
        source: regex::Error,
    },
}

/// Failures of a whole validation run.
#[derive(Error, Debug)]
pub enum GateError {
    /// The repository violates its requirements and the run was configured to fail.
    ///
    /// The message is the rendering of the consolidated result.
    #[error("{0}")]
    InvalidRepository(ValidationResult),

    /// HEAD does not point to a commit, so there is no history to validate.
    #[error("Unable to resolve HEAD to a commit")]
    HeadUnresolvable,
}

// Note: anyhow already has a blanket impl for thiserror::Error types
