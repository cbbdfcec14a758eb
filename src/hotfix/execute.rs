//! Replay execution - effectful operations
//!
//! Takes a [`HotfixPlan`] (created by the pure planning functions) and
//! replays it onto a fresh hotfix branch through a [`Replayer`]. The first
//! failure aborts the run; nothing is rolled back.

use crate::error::{Error, Result};
use crate::hotfix::plan::HotfixPlan;
use crate::hotfix::progress::ProgressCallback;
use crate::hotfix::sequence::{replay_steps, short_sha};
use tracing::debug;

/// Version-control operations needed to build a hotfix branch
pub trait Replayer: Send + Sync {
    /// Fail if the working tree has uncommitted changes
    fn ensure_clean(&self) -> Result<()>;

    /// Fetch, check out and update `release_branch`, then create `hotfix_branch` from it
    fn prepare_branch(&self, remote: &str, release_branch: &str, hotfix_branch: &str)
    -> Result<()>;

    /// Apply a single commit onto the current branch
    fn cherry_pick(&self, commit_id: &str) -> Result<()>;

    /// Push `branch` to `remote` and set upstream
    fn push(&self, remote: &str, branch: &str) -> Result<()>;
}

/// Branch and remote names for a replay run
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    /// Remote to fetch from and push to
    pub remote: String,
    /// Release branch the hotfix is based on
    pub release_branch: String,
    /// Name of the hotfix branch to create
    pub hotfix_branch: String,
    /// Whether to push the hotfix branch when done
    pub push: bool,
}

/// Result of replay execution
#[derive(Debug, Clone, Default)]
pub struct ReplayOutcome {
    /// Main-line commits applied, in order
    pub replayed: Vec<String>,
    /// Whether the hotfix branch was pushed
    pub pushed: bool,
}

/// Execute the hotfix plan (EFFECTFUL)
///
/// Creates the hotfix branch, cherry-picks every main-line commit in replay
/// order, and optionally pushes the branch.
pub async fn execute_replay(
    plan: &HotfixPlan,
    replayer: &dyn Replayer,
    options: &ReplayOptions,
    progress: &dyn ProgressCallback,
) -> Result<ReplayOutcome> {
    if plan.is_empty() {
        return Err(Error::NoCommitsToReplay(plan.change_request_numbers()));
    }

    replayer.ensure_clean()?;

    progress
        .on_message(&format!(
            "Creating {} from {}",
            options.hotfix_branch, options.release_branch
        ))
        .await;
    replayer.prepare_branch(
        &options.remote,
        &options.release_branch,
        &options.hotfix_branch,
    )?;

    let mut outcome = ReplayOutcome::default();
    for step in replay_steps(plan) {
        let commit_id = step.mainline_id();
        progress.on_message(&format!("Cherry-picking {step}")).await;

        replayer.cherry_pick(commit_id).map_err(|e| Error::Replay {
            commit: short_sha(commit_id).to_string(),
            applied: outcome.replayed.len(),
            message: e.to_string(),
        })?;
        debug!(commit = commit_id, "replayed commit");
        outcome.replayed.push(commit_id.to_string());
    }

    if options.push {
        progress
            .on_message(&format!(
                "Pushing {} to {}",
                options.hotfix_branch, options.remote
            ))
            .await;
        replayer.push(&options.remote, &options.hotfix_branch)?;
        outcome.pushed = true;
    }

    Ok(outcome)
}
