//! Shared test utilities for the `git` module.

use std::collections::{HashMap, HashSet};

use anyhow::{anyhow, Result};
use git2::Oid;

use crate::git::{CommitRecord, GitAccess};

/// In-memory repository implementing [`GitAccess`].
///
/// Commits are added oldest first; each new commit gets a commit time one
/// second after the previous one and becomes HEAD. Walks return commits sorted
/// newest first, like the git2 implementation.
pub(crate) struct FakeRepository {
    branch: Option<String>,
    commits: Vec<CommitRecord>,
    parents: HashMap<Oid, Vec<Oid>>,
    head: Option<Oid>,
}

impl FakeRepository {
    /// Creates an empty repository checked out on `branch`.
    pub(crate) fn new(branch: &str) -> Self {
        Self {
            branch: Some(branch.to_string()),
            commits: Vec::new(),
            parents: HashMap::new(),
            head: None,
        }
    }

    /// Creates a repository whose HEAD reference cannot be read.
    pub(crate) fn without_head() -> Self {
        Self {
            branch: None,
            commits: Vec::new(),
            parents: HashMap::new(),
            head: None,
        }
    }

    /// Adds a commit on top of the current HEAD and returns its id.
    pub(crate) fn commit(&mut self, message: &str) -> Oid {
        let parents = self.head.into_iter().collect();
        self.commit_with_parents(message, parents)
    }

    /// Adds a commit with explicit parents and makes it HEAD.
    pub(crate) fn commit_with_parents(&mut self, message: &str, parents: Vec<Oid>) -> Oid {
        let ordinal = self.commits.len() + 1;
        let id = Oid::from_str(&format!("{:02x}", ordinal % 256).repeat(20))
            .unwrap_or_else(|_| Oid::zero());
        self.commits.push(CommitRecord {
            id,
            parent_count: parents.len(),
            summary: message.to_string(),
            commit_time: 1_710_516_900 + ordinal as i64,
        });
        self.parents.insert(id, parents);
        self.head = Some(id);
        id
    }

    /// Adds a commit with explicit parents without moving HEAD.
    pub(crate) fn side_commit(&mut self, message: &str, parents: Vec<Oid>) -> Oid {
        let head = self.head;
        let id = self.commit_with_parents(message, parents);
        self.head = head;
        id
    }

    fn reachable(&self, from: Oid) -> HashSet<Oid> {
        let mut seen = HashSet::new();
        let mut pending = vec![from];
        while let Some(id) = pending.pop() {
            if seen.insert(id) {
                if let Some(parents) = self.parents.get(&id) {
                    pending.extend(parents.iter().copied());
                }
            }
        }
        seen
    }

    fn newest_first(&self, ids: &HashSet<Oid>) -> Vec<CommitRecord> {
        let mut commits: Vec<CommitRecord> = self
            .commits
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect();
        commits.sort_by(|a, b| b.commit_time.cmp(&a.commit_time));
        commits
    }
}

impl GitAccess for FakeRepository {
    fn current_branch_name(&self) -> Result<String> {
        self.branch
            .clone()
            .ok_or_else(|| anyhow!("Failed to get HEAD reference"))
    }

    fn resolve(&self, revision: &str) -> Result<Option<Oid>> {
        if revision == "HEAD" {
            return Ok(self.head);
        }
        if revision.len() < 4 {
            return Ok(None);
        }
        let matches: Vec<Oid> = self
            .commits
            .iter()
            .map(|c| c.id)
            .filter(|id| id.to_string().starts_with(revision))
            .collect();
        Ok(match matches.as_slice() {
            [id] => Some(*id),
            _ => None,
        })
    }

    fn parse_commit(&self, id: Oid) -> Result<CommitRecord> {
        self.commits
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("Failed to find commit {id}"))
    }

    fn commits_in_range(&self, since: Oid, until: Oid) -> Result<Vec<CommitRecord>> {
        let hidden = self.reachable(since);
        let visible: HashSet<Oid> = self
            .reachable(until)
            .into_iter()
            .filter(|id| !hidden.contains(id))
            .collect();
        Ok(self.newest_first(&visible))
    }

    fn all_ancestors_of(&self, until: Oid) -> Result<Vec<CommitRecord>> {
        Ok(self.newest_first(&self.reachable(until)))
    }
}

/// Builds the reference history used across validator tests.
///
/// On branch `main`: `messagus-1` to `messagus-3`, then a side commit
/// `messagus-4` merged back with `Merge commit`, then `messagus-5`.
pub(crate) fn messagus_history() -> (FakeRepository, Vec<Oid>) {
    let mut repo = FakeRepository::new("main");
    let m1 = repo.commit("messagus-1");
    let m2 = repo.commit("messagus-2");
    let m3 = repo.commit("messagus-3");
    let m4 = repo.side_commit("messagus-4", vec![m3]);
    let merge = repo.commit_with_parents("Merge commit", vec![m3, m4]);
    let m5 = repo.commit("messagus-5");
    (repo, vec![m1, m2, m3, m4, merge, m5])
}
