//! Replay sequencing
//!
//! Flattens a [`HotfixPlan`] into the exact order commits are cherry-picked:
//! change requests in plan order, and within each, head to tail.

use crate::hotfix::plan::{CommitMatch, HotfixPlan};
use crate::types::ChangeRequest;

/// One replay step with its originating change request
#[derive(Debug, Clone, Copy)]
pub struct ReplayStep<'a> {
    /// Change request the commit belongs to
    pub change_request: &'a ChangeRequest,
    /// Matched commit pair
    pub commit_match: &'a CommitMatch,
}

impl ReplayStep<'_> {
    /// Main-line commit id to replay
    pub fn mainline_id(&self) -> &str {
        &self.commit_match.mainline_commit.id
    }
}

impl std::fmt::Display for ReplayStep<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} {}",
            self.change_request.number,
            short_sha(self.mainline_id()),
            self.commit_match.change_request_commit.summary()
        )
    }
}

/// Walk the plan in replay order
pub fn replay_steps(plan: &HotfixPlan) -> impl Iterator<Item = ReplayStep<'_>> {
    plan.change_requests.iter().flat_map(|planned| {
        planned.matches.iter().map(move |commit_match| ReplayStep {
            change_request: &planned.change_request,
            commit_match,
        })
    })
}

/// Main-line commit ids in replay order
pub fn replay_sequence(plan: &HotfixPlan) -> Vec<String> {
    replay_steps(plan)
        .map(|step| step.mainline_id().to_string())
        .collect()
}

/// Abbreviate a commit SHA for display
pub fn short_sha(id: &str) -> &str {
    id.get(..7).unwrap_or(id)
}
