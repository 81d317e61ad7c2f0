//! Git operations and repository access.

use anyhow::Result;
use git2::Oid;

pub mod commit;
pub mod repository;
#[cfg(test)]
pub(crate) mod test_utils;

pub use commit::CommitRecord;
pub use repository::GitRepository;

/// Read-only view of a repository consumed by the validators.
///
/// Implementations must never mutate the repository.
pub trait GitAccess {
    /// Returns the name of the currently checked-out branch.
    fn current_branch_name(&self) -> Result<String>;

    /// Resolves a revision string to a commit id.
    ///
    /// Returns `Ok(None)` when the revision does not name a commit.
    fn resolve(&self, revision: &str) -> Result<Option<Oid>>;

    /// Loads the commit with the given id.
    fn parse_commit(&self, id: Oid) -> Result<CommitRecord>;

    /// Returns the commits reachable from `until` but not from `since`,
    /// newest first. `since` itself is excluded.
    fn commits_in_range(&self, since: Oid, until: Oid) -> Result<Vec<CommitRecord>>;

    /// Returns `until` and all of its ancestors, newest first.
    fn all_ancestors_of(&self, until: Oid) -> Result<Vec<CommitRecord>>;
}
