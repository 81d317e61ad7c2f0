//! Commit snapshots.

use std::fmt;

use chrono::{DateTime, Local};
use git2::{Commit, Oid};

/// Format used for human-readable commit times.
pub const READABLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Owned snapshot of the commit fields the validators look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Commit id
    pub id: Oid,
    /// Number of parent commits
    pub parent_count: usize,
    /// First paragraph of the commit message, whitespace squashed
    pub summary: String,
    /// Committer time in seconds since the Unix epoch
    pub commit_time: i64,
}

impl CommitRecord {
    /// Creates a CommitRecord from git2::Commit
    pub fn from_git_commit(commit: &Commit) -> Self {
        let summary = commit
            .summary_bytes()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default();

        Self {
            id: commit.id(),
            parent_count: commit.parent_count(),
            summary,
            commit_time: commit.time().seconds(),
        }
    }

    /// Returns whether the commit has two or more parents.
    pub fn is_merge(&self) -> bool {
        self.parent_count >= 2
    }

    /// Renders the committer time in the local time zone.
    pub fn readable_time(&self) -> String {
        match DateTime::from_timestamp(self.commit_time, 0) {
            Some(utc) => utc
                .with_timezone(&Local)
                .format(READABLE_TIME_FORMAT)
                .to_string(),
            None => self.commit_time.to_string(),
        }
    }
}

impl fmt::Display for CommitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "commit {} {}", self.id, self.commit_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(parent_count: usize) -> CommitRecord {
        CommitRecord {
            id: Oid::from_str("9db09a021fc8873ad972140196d21465e6adfc07").unwrap(),
            parent_count,
            summary: "messagus-5".to_string(),
            commit_time: 1_710_517_172,
        }
    }

    #[test]
    fn display_shows_id_and_commit_time() {
        assert_eq!(
            record(1).to_string(),
            "commit 9db09a021fc8873ad972140196d21465e6adfc07 1710517172"
        );
    }

    #[test]
    fn merge_detection_uses_parent_count() {
        assert!(!record(0).is_merge());
        assert!(!record(1).is_merge());
        assert!(record(2).is_merge());
        assert!(record(3).is_merge());
    }

    #[test]
    fn readable_time_matches_local_rendering() {
        let expected = DateTime::from_timestamp(1_710_517_172, 0)
            .unwrap()
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(record(1).readable_time(), expected);
        assert_eq!(expected.len(), "yyyy-MM-dd HH:mm:ss".len());
    }
}
