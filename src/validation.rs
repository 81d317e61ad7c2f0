//! Repository requirement validators and their results.

use anyhow::Result;

pub mod branch;
pub mod cluster;
pub mod message;
pub mod pattern;
pub mod range;
pub mod result;

pub use branch::BranchValidator;
pub use cluster::ValidatorsCluster;
pub use message::MessageValidator;
pub use pattern::Pattern;
pub use range::CommitRangeResolver;
pub use result::{ValidationResult, Violation};

/// A single repository check.
///
/// Validators hold no mutable state: each call inspects the repository afresh.
pub trait Validator {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Runs the check and collects its violations.
    ///
    /// Violations are data; `Err` is reserved for failures to read the repository.
    fn validate(&self) -> Result<ValidationResult>;
}
