//! Git repository operations

use std::path::Path;

use anyhow::{Context, Result};
use git2::{ErrorCode, Oid, Repository, Revwalk, Sort};
use tracing::debug;

use crate::git::{CommitRecord, GitAccess};

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Opens the repository containing the current directory
    pub fn open() -> Result<Self> {
        let repo = Repository::discover(".").context("Not in a git repository")?;
        debug!("Git directory for the current repository: {}", repo.path().display());

        Ok(Self { repo })
    }

    /// Opens the repository containing the specified path
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::discover(path)
            .with_context(|| format!("Failed to open git repository at {}", path.display()))?;
        debug!("Git directory for {}: {}", path.display(), repo.path().display());

        Ok(Self { repo })
    }

    /// Get workdir path
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Get access to the underlying git2::Repository
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    fn time_sorted_walk(&self) -> Result<Revwalk<'_>> {
        let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
        walker
            .set_sorting(Sort::TIME)
            .context("Failed to set revwalk sorting")?;
        Ok(walker)
    }

    fn collect_walk(&self, walker: Revwalk<'_>) -> Result<Vec<CommitRecord>> {
        let mut commits = Vec::new();
        for oid in walker {
            let oid = oid.context("Failed to get commit OID from walker")?;
            commits.push(self.parse_commit(oid)?);
        }
        Ok(commits)
    }
}

impl GitAccess for GitRepository {
    fn current_branch_name(&self) -> Result<String> {
        let head = self
            .repo
            .find_reference("HEAD")
            .context("Failed to get HEAD reference")?;

        if let Some(target) = head.symbolic_target() {
            let name = target.strip_prefix("refs/heads/").unwrap_or(target);
            return Ok(name.to_string());
        }

        // Detached HEAD: the branch name is the commit id, as `git` reports it
        let oid = head.target().context("HEAD reference has no target")?;
        Ok(oid.to_string())
    }

    fn resolve(&self, revision: &str) -> Result<Option<Oid>> {
        let object = match self.repo.revparse_single(revision) {
            Ok(object) => object,
            Err(e) if is_unresolvable(&e) => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to resolve revision: {revision}"))
            }
        };

        match object.peel_to_commit() {
            Ok(commit) => Ok(Some(commit.id())),
            Err(e) if is_unresolvable(&e) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to peel {revision} to a commit")),
        }
    }

    fn parse_commit(&self, id: Oid) -> Result<CommitRecord> {
        let commit = self
            .repo
            .find_commit(id)
            .with_context(|| format!("Failed to find commit {id}"))?;
        Ok(CommitRecord::from_git_commit(&commit))
    }

    fn commits_in_range(&self, since: Oid, until: Oid) -> Result<Vec<CommitRecord>> {
        let mut walker = self.time_sorted_walk()?;
        walker.push(until).context("Failed to push end commit")?;
        walker.hide(since).context("Failed to hide start commit")?;
        self.collect_walk(walker)
    }

    fn all_ancestors_of(&self, until: Oid) -> Result<Vec<CommitRecord>> {
        let mut walker = self.time_sorted_walk()?;
        walker.push(until).context("Failed to push end commit")?;
        self.collect_walk(walker)
    }
}

/// Errors meaning "this revision does not name a commit" rather than an I/O failure
fn is_unresolvable(error: &git2::Error) -> bool {
    matches!(
        error.code(),
        ErrorCode::NotFound | ErrorCode::InvalidSpec | ErrorCode::Ambiguous | ErrorCode::Peel
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{RepositoryInitOptions, Signature, Time};
    use tempfile::TempDir;

    fn init_repo(branch: &str) -> (TempDir, GitRepository) {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(branch);
        Repository::init_opts(temp_dir.path(), &opts).unwrap();
        let repo = GitRepository::open_at(temp_dir.path()).unwrap();
        (temp_dir, repo)
    }

    fn commit(repo: &Repository, message: &str, seconds: i64, parents: &[Oid]) -> Oid {
        let signature = Signature::new("Test User", "test@example.com", &Time::new(seconds, 0))
            .unwrap();
        let tree_id = repo.treebuilder(None).unwrap().write().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents: Vec<git2::Commit> = parents
            .iter()
            .map(|id| repo.find_commit(*id).unwrap())
            .collect();
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parent_refs,
        )
        .unwrap()
    }

    #[test]
    fn branch_name_of_unborn_branch() {
        let (_dir, repo) = init_repo("main");
        assert_eq!(repo.current_branch_name().unwrap(), "main");
    }

    #[test]
    fn branch_name_of_detached_head_is_commit_id() {
        let (_dir, repo) = init_repo("main");
        let first = commit(repo.repository(), "first", 1_000, &[]);
        repo.repository().set_head_detached(first).unwrap();
        assert_eq!(repo.current_branch_name().unwrap(), first.to_string());
    }

    #[test]
    fn resolve_full_and_abbreviated_hash() {
        let (_dir, repo) = init_repo("main");
        let first = commit(repo.repository(), "first", 1_000, &[]);
        let hash = first.to_string();
        assert_eq!(repo.resolve(&hash).unwrap(), Some(first));
        assert_eq!(repo.resolve(&hash[..8]).unwrap(), Some(first));
        assert_eq!(repo.resolve("HEAD").unwrap(), Some(first));
    }

    #[test]
    fn resolve_unknown_revision_is_none() {
        let (_dir, repo) = init_repo("main");
        commit(repo.repository(), "first", 1_000, &[]);
        assert_eq!(repo.resolve("non-existent-hash").unwrap(), None);
        assert_eq!(repo.resolve("ffffffff").unwrap(), None);
    }

    #[test]
    fn resolve_head_of_unborn_branch_is_not_a_commit() {
        let (_dir, repo) = init_repo("main");
        assert!(!matches!(repo.resolve("HEAD"), Ok(Some(_))));
    }

    #[test]
    fn parse_commit_reads_summary_and_parents() {
        let (_dir, repo) = init_repo("main");
        let first = commit(repo.repository(), "first\n\nbody text", 1_000, &[]);
        let second = commit(repo.repository(), "second", 2_000, &[first]);

        let record = repo.parse_commit(second).unwrap();
        assert_eq!(record.summary, "second");
        assert_eq!(record.parent_count, 1);
        assert_eq!(record.commit_time, 2_000);

        let root = repo.parse_commit(first).unwrap();
        assert_eq!(root.summary, "first");
        assert_eq!(root.parent_count, 0);
    }

    #[test]
    fn range_excludes_since_and_walks_newest_first() {
        let (_dir, repo) = init_repo("main");
        let c1 = commit(repo.repository(), "one", 1_000, &[]);
        let c2 = commit(repo.repository(), "two", 2_000, &[c1]);
        let c3 = commit(repo.repository(), "three", 3_000, &[c2]);

        let ranged: Vec<Oid> = repo
            .commits_in_range(c1, c3)
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ranged, vec![c3, c2]);

        let all: Vec<Oid> = repo
            .all_ancestors_of(c3)
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(all, vec![c3, c2, c1]);
    }
}
