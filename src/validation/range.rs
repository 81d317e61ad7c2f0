//! Resolution of the commits subject to message validation.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::error::GateError;
use crate::git::{CommitRecord, GitAccess};

/// Revision the range always ends at.
pub const HEAD: &str = "HEAD";

/// Produces the ordered list of commits from a start commit up to HEAD.
pub struct CommitRangeResolver<'r> {
    git: &'r dyn GitAccess,
}

impl<'r> CommitRangeResolver<'r> {
    /// Creates a resolver over the given repository.
    pub fn new(git: &'r dyn GitAccess) -> Self {
        Self { git }
    }

    /// Returns the commits to check, newest first.
    ///
    /// When `start_commit_hash` resolves, the result is `(start, HEAD]`
    /// followed by the start commit itself. Otherwise it is the whole history
    /// reachable from HEAD. An unresolvable HEAD is an error.
    pub fn resolve(&self, start_commit_hash: &str) -> Result<Vec<CommitRecord>> {
        debug!("Extracting ranged commits since '{start_commit_hash}' and until '{HEAD}'");
        let head = self
            .git
            .resolve(HEAD)
            .context("Failed to resolve HEAD")?
            .ok_or(GateError::HeadUnresolvable)?;

        let commits = match self.resolve_start(start_commit_hash) {
            Some(start) => {
                debug!("Extracting ranged commits since '{start}' and until '{head}'");
                let mut commits = self
                    .git
                    .commits_in_range(start.id, head)
                    .context("Failed to walk commit range")?;
                // The range query excludes `since`; the start commit is validated too
                commits.push(start);
                commits
            }
            None => {
                debug!("Extracting commits until '{head}'");
                self.git
                    .all_ancestors_of(head)
                    .context("Failed to walk commit history")?
            }
        };

        debug!("Number of extracted commits: '{}'", commits.len());
        Ok(commits)
    }

    fn resolve_start(&self, start_commit_hash: &str) -> Option<CommitRecord> {
        if start_commit_hash.is_empty() {
            debug!("Unable to parse this commit: '{start_commit_hash}'");
            return None;
        }

        let parsed = self
            .git
            .resolve(start_commit_hash)
            .and_then(|id| id.map(|id| self.git.parse_commit(id)).transpose());

        match parsed {
            Ok(Some(commit)) => {
                debug!("Parsed commit: {commit}");
                Some(commit)
            }
            Ok(None) => {
                warn!("Unable to parse this commit: '{start_commit_hash}'");
                None
            }
            Err(e) => {
                warn!("Unable to parse this commit: '{start_commit_hash}': {e:#}");
                None
            }
        }
    }
}
