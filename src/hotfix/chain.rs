//! Per-change-request commit chains
//!
//! A chain keeps the commits of one change request in authoring order
//! (oldest first). Neighbours are positional: entry `i` is preceded by `i - 1`
//! and followed by `i + 1`.

use crate::hotfix::fingerprint::Fingerprint;
use crate::types::{ChangeRequest, Commit};
use std::collections::HashMap;
use tracing::{debug, warn};

/// A change request together with its commits as fetched from the platform
#[derive(Debug, Clone)]
pub struct ChangeRequestCommits {
    /// Change request metadata
    pub change_request: ChangeRequest,
    /// Commits, oldest first
    pub commits: Vec<Commit>,
}

/// One change request commit and its fingerprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEntry {
    /// Content fingerprint of `commit`
    pub fingerprint: Fingerprint,
    /// The original change request commit
    pub commit: Commit,
}

/// Ordered commits of a single change request
#[derive(Debug, Clone)]
pub struct CommitChain {
    change_request: ChangeRequest,
    entries: Vec<ChainEntry>,
    by_fingerprint: HashMap<Fingerprint, usize>,
}

impl CommitChain {
    /// Build a chain from commits in authoring order (oldest first)
    pub fn build(change_request: ChangeRequest, commits: Vec<Commit>) -> Self {
        let mut entries = Vec::with_capacity(commits.len());
        let mut by_fingerprint = HashMap::with_capacity(commits.len());

        for commit in commits {
            if commit.author_date.is_none() {
                warn!(
                    change_request = change_request.number,
                    commit = %commit.id,
                    "commit has no author date, fingerprint covers the message only"
                );
            }
            let fingerprint = Fingerprint::of_commit(&commit);
            by_fingerprint.entry(fingerprint).or_insert(entries.len());
            entries.push(ChainEntry {
                fingerprint,
                commit,
            });
        }

        debug!(
            change_request = change_request.number,
            commits = entries.len(),
            "built commit chain"
        );

        Self {
            change_request,
            entries,
            by_fingerprint,
        }
    }

    /// Build a chain from gathered change request data
    pub fn from_gathered(gathered: ChangeRequestCommits) -> Self {
        Self::build(gathered.change_request, gathered.commits)
    }

    /// The change request owning this chain
    pub const fn change_request(&self) -> &ChangeRequest {
        &self.change_request
    }

    /// All entries, head to tail
    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    /// Oldest commit
    pub fn head(&self) -> Option<&ChainEntry> {
        self.entries.first()
    }

    /// Newest commit
    pub fn tail(&self) -> Option<&ChainEntry> {
        self.entries.last()
    }

    /// Entry at `position`
    pub fn get(&self, position: usize) -> Option<&ChainEntry> {
        self.entries.get(position)
    }

    /// Entry authored before the one at `position`
    pub fn previous(&self, position: usize) -> Option<&ChainEntry> {
        position.checked_sub(1).and_then(|p| self.entries.get(p))
    }

    /// Entry authored after the one at `position`
    pub fn next(&self, position: usize) -> Option<&ChainEntry> {
        self.entries.get(position + 1)
    }

    /// Position of the first entry with this fingerprint
    pub fn find(&self, fingerprint: Fingerprint) -> Option<usize> {
        self.by_fingerprint.get(&fingerprint).copied()
    }

    /// Number of commits
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the change request has no commits
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
