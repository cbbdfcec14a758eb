//! Recording replayer for testing the execute phase

#![allow(dead_code)]

use hotfix_pick::error::{Error, Result};
use hotfix_pick::hotfix::Replayer;
use std::sync::Mutex;

/// A single recorded replayer call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayCall {
    EnsureClean,
    PrepareBranch {
        remote: String,
        release: String,
        hotfix: String,
    },
    CherryPick(String),
    Push {
        remote: String,
        branch: String,
    },
}

/// Replayer that records calls instead of running git
#[derive(Default)]
pub struct MockReplayer {
    calls: Mutex<Vec<ReplayCall>>,
    dirty: Mutex<bool>,
    fail_on_commit: Mutex<Option<String>>,
}

impl MockReplayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `ensure_clean` fail as if the working tree had local changes
    pub fn set_dirty(&self) {
        *self.dirty.lock().unwrap() = true;
    }

    /// Make `cherry_pick` fail for `commit_id`
    pub fn fail_on(&self, commit_id: &str) {
        *self.fail_on_commit.lock().unwrap() = Some(commit_id.to_string());
    }

    pub fn calls(&self) -> Vec<ReplayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Commit ids passed to `cherry_pick`, in call order
    pub fn cherry_picked(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ReplayCall::CherryPick(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn pushed(&self) -> bool {
        self.calls()
            .iter()
            .any(|call| matches!(call, ReplayCall::Push { .. }))
    }
}

impl Replayer for MockReplayer {
    fn ensure_clean(&self) -> Result<()> {
        self.calls.lock().unwrap().push(ReplayCall::EnsureClean);
        if *self.dirty.lock().unwrap() {
            return Err(Error::Repository(
                "working tree has uncommitted changes".to_string(),
            ));
        }
        Ok(())
    }

    fn prepare_branch(&self, remote: &str, release_branch: &str, hotfix_branch: &str) -> Result<()> {
        self.calls.lock().unwrap().push(ReplayCall::PrepareBranch {
            remote: remote.to_string(),
            release: release_branch.to_string(),
            hotfix: hotfix_branch.to_string(),
        });
        Ok(())
    }

    fn cherry_pick(&self, commit_id: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(ReplayCall::CherryPick(commit_id.to_string()));
        if self.fail_on_commit.lock().unwrap().as_deref() == Some(commit_id) {
            return Err(Error::Git {
                command: format!("cherry-pick {commit_id}"),
                message: "could not apply".to_string(),
            });
        }
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.calls.lock().unwrap().push(ReplayCall::Push {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });
        Ok(())
    }
}
