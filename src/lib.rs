//! # commit-gate
//!
//! Validates that the current branch name and the commit messages of a Git
//! repository conform to configured regular-expression policies.
//!
//! ## Features
//!
//! - Whole-string, optionally case-insensitive matching of branch names and
//!   commit message summaries
//! - Commit ranges starting at a given commit (inclusive) with a whole-history
//!   fallback when the start commit cannot be resolved
//! - Optional exclusion of merge commits
//! - Layered configuration from YAML files, environment variables and flags
//!
//! ## Quick Start
//!
//! ```no_run
//! use commit_gate::config::RepositoryRequirements;
//! use commit_gate::git::GitRepository;
//! use commit_gate::validation::ValidatorsCluster;
//!
//! # fn main() -> anyhow::Result<()> {
//! let repo = GitRepository::open()?;
//! let requirements = RepositoryRequirements::default();
//! let result = ValidatorsCluster::new(&repo, &requirements)?.validate()?;
//! println!("{result}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod validation;

pub use crate::cli::Cli;
pub use crate::error::{GateError, PatternError};

/// The current version of commit-gate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
