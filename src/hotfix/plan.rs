//! Hotfix planning - pure functions for creating hotfix plans
//!
//! No I/O happens here. Change requests and main-line commits are fetched
//! beforehand by the caller, which keeps the matching and ordering logic
//! easy to unit test.

use crate::error::{Error, Result};
use crate::hotfix::chain::{ChangeRequestCommits, CommitChain};
use crate::hotfix::fingerprint::Fingerprint;
use crate::hotfix::index::{EntryRef, FingerprintIndex};
use crate::hotfix::matcher::{self, AmbiguousMatch};
use crate::types::{ChangeRequest, Commit};
use std::cmp::Ordering;
use tracing::debug;

/// A change request commit paired with its main-line counterpart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMatch {
    /// Shared content fingerprint
    pub fingerprint: Fingerprint,
    /// Original commit from the change request
    pub change_request_commit: Commit,
    /// Rewritten commit on the main line
    pub mainline_commit: Commit,
}

/// A change request with every commit matched, in authoring order
#[derive(Debug, Clone)]
pub struct PlannedChangeRequest {
    /// Change request metadata
    pub change_request: ChangeRequest,
    /// Matches from head (oldest) to tail (newest)
    pub matches: Vec<CommitMatch>,
}

impl PlannedChangeRequest {
    /// Oldest match
    pub fn head(&self) -> Option<&CommitMatch> {
        self.matches.first()
    }

    /// Newest match
    pub fn tail(&self) -> Option<&CommitMatch> {
        self.matches.last()
    }
}

/// Hotfix plan - the functional core output
///
/// Describes which main-line commits to replay and in which order. Created by
/// [`create_hotfix_plan`] (pure) and executed by
/// [`execute_replay`](crate::hotfix::execute_replay) (effectful).
#[derive(Debug, Clone)]
pub struct HotfixPlan {
    /// Change requests in replay order
    pub change_requests: Vec<PlannedChangeRequest>,
    /// Main-line commits skipped because their fingerprint was already bound
    pub ambiguities: Vec<AmbiguousMatch>,
}

impl HotfixPlan {
    /// Total number of commits to replay
    pub fn commit_count(&self) -> usize {
        self.change_requests.iter().map(|cr| cr.matches.len()).sum()
    }

    /// Whether there is nothing to replay
    pub fn is_empty(&self) -> bool {
        self.commit_count() == 0
    }

    /// Numbers of the planned change requests, in replay order
    pub fn change_request_numbers(&self) -> Vec<u64> {
        self.change_requests
            .iter()
            .map(|cr| cr.change_request.number)
            .collect()
    }
}

/// Create a hotfix plan (PURE - no I/O, easily testable)
///
/// Orders the change requests for replay, builds one chain per change
/// request, indexes every fingerprint, and resolves the index against
/// `mainline` (oldest-first).
///
/// # Errors
/// - [`Error::NoMergedChangeRequests`] if `gathered` is empty
/// - [`Error::NoCommitsToReplay`] if none of the change requests has a commit
/// - [`Error::UnmatchedCommits`] if any change request commit has no
///   main-line counterpart
pub fn create_hotfix_plan(
    mut gathered: Vec<ChangeRequestCommits>,
    mainline: &[Commit],
) -> Result<HotfixPlan> {
    if gathered.is_empty() {
        return Err(Error::NoMergedChangeRequests);
    }

    // Chains are indexed in replay order, so the earliest main-line copy of a
    // shared fingerprint binds to the earliest merged change request
    order_change_requests(&mut gathered);

    let chains: Vec<CommitChain> = gathered
        .into_iter()
        .map(CommitChain::from_gathered)
        .collect();
    let index = FingerprintIndex::build(&chains);
    let resolution = matcher::resolve(&chains, &index, mainline)?;
    let (mut bound, ambiguities) = resolution.into_parts();

    let mut change_requests = Vec::with_capacity(chains.len());
    for (chain_idx, chain) in chains.into_iter().enumerate() {
        let mut matches = Vec::with_capacity(chain.len());
        for (position, entry) in chain.entries().iter().enumerate() {
            let mainline_commit = bound
                .remove(&EntryRef {
                    chain: chain_idx,
                    position,
                })
                .ok_or_else(|| {
                    Error::Internal(format!(
                        "resolved plan is missing commit {} of #{}",
                        entry.commit.id,
                        chain.change_request().number
                    ))
                })?;
            matches.push(CommitMatch {
                fingerprint: entry.fingerprint,
                change_request_commit: entry.commit.clone(),
                mainline_commit,
            });
        }
        change_requests.push(PlannedChangeRequest {
            change_request: chain.change_request().clone(),
            matches,
        });
    }

    let plan = HotfixPlan {
        change_requests,
        ambiguities,
    };
    if plan.is_empty() {
        return Err(Error::NoCommitsToReplay(plan.change_request_numbers()));
    }
    debug!(
        change_requests = ?plan.change_request_numbers(),
        commits = plan.commit_count(),
        "created hotfix plan"
    );
    Ok(plan)
}

/// Order change requests for replay: earliest merge first.
///
/// Equal or missing merge timestamps fall back to the change request number.
/// Change requests without a merge timestamp go last.
pub fn order_change_requests(change_requests: &mut [ChangeRequestCommits]) {
    change_requests.sort_by(|a, b| replay_order(&a.change_request, &b.change_request));
}

/// Total order on change requests used for replay
pub fn replay_order(a: &ChangeRequest, b: &ChangeRequest) -> Ordering {
    let by_merge = match (a.merged_at, b.merged_at) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_merge.then_with(|| a.number.cmp(&b.number))
}
