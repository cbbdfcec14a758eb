//! Main-line matching
//!
//! Scans main-line commits oldest-first and binds each one whose fingerprint
//! is indexed to the next unbound chain entry carrying that fingerprint.
//! Binding is first-come-first-served in scan order; surplus main-line commits
//! are reported as ambiguities rather than rebinding an entry.

use crate::error::{Error, Result, UnmatchedCommit};
use crate::hotfix::chain::CommitChain;
use crate::hotfix::fingerprint::Fingerprint;
use crate::hotfix::index::{EntryRef, FingerprintIndex};
use crate::types::{ChangeRequest, Commit};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, warn};

/// A main-line commit whose fingerprint was already fully bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousMatch {
    /// Shared fingerprint
    pub fingerprint: Fingerprint,
    /// Main-line commit that was bound earlier in the scan
    pub bound_commit_id: String,
    /// Main-line commit that was left out
    pub ignored_commit_id: String,
}

/// Outcome of a complete main-line scan
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    bound: HashMap<EntryRef, Commit>,
    ambiguities: Vec<AmbiguousMatch>,
    scanned: usize,
}

impl Resolution {
    /// Main-line commit bound to `entry`
    pub fn mainline_for(&self, entry: EntryRef) -> Option<&Commit> {
        self.bound.get(&entry)
    }

    /// Main-line commits left out because their fingerprint was already bound
    pub fn ambiguities(&self) -> &[AmbiguousMatch] {
        &self.ambiguities
    }

    /// Number of main-line commits examined
    pub const fn scanned(&self) -> usize {
        self.scanned
    }

    /// Number of bound entries
    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }

    pub(crate) fn into_parts(self) -> (HashMap<EntryRef, Commit>, Vec<AmbiguousMatch>) {
        (self.bound, self.ambiguities)
    }
}

/// Earliest creation date among the change requests.
///
/// Every rewritten commit of these change requests landed on the main line
/// after this instant, so it bounds the main-line scan window.
pub fn cutoff_date(change_requests: &[ChangeRequest]) -> Option<DateTime<Utc>> {
    change_requests.iter().map(|cr| cr.created_at).min()
}

/// Resolve every indexed chain entry against the main line.
///
/// `mainline` must be oldest-first. Fails with [`Error::UnmatchedCommits`]
/// listing every entry left unbound after the full scan.
pub fn resolve(
    chains: &[CommitChain],
    index: &FingerprintIndex,
    mainline: &[Commit],
) -> Result<Resolution> {
    let mut bound: HashMap<EntryRef, Commit> = HashMap::with_capacity(index.len());
    let mut next_slot: HashMap<Fingerprint, usize> = HashMap::new();
    let mut last_bound: HashMap<Fingerprint, String> = HashMap::new();
    let mut ambiguities = Vec::new();

    for commit in mainline {
        let fingerprint = Fingerprint::of_commit(commit);
        let Some(refs) = index.get(fingerprint) else {
            continue;
        };

        let slot = next_slot.entry(fingerprint).or_insert(0);
        if let Some(entry) = refs.get(*slot) {
            debug!(
                %fingerprint,
                mainline = %commit.id,
                chain = entry.chain,
                position = entry.position,
                "bound main-line commit"
            );
            bound.insert(*entry, commit.clone());
            last_bound.insert(fingerprint, commit.id.clone());
            *slot += 1;
        } else {
            let bound_commit_id = last_bound.get(&fingerprint).cloned().unwrap_or_default();
            warn!(
                %fingerprint,
                bound = %bound_commit_id,
                ignored = %commit.id,
                "main-line commit shares a fingerprint with an already matched commit"
            );
            ambiguities.push(AmbiguousMatch {
                fingerprint,
                bound_commit_id,
                ignored_commit_id: commit.id.clone(),
            });
        }
    }

    let unmatched: Vec<UnmatchedCommit> = index
        .entries()
        .into_iter()
        .filter(|entry| !bound.contains_key(entry))
        .filter_map(|entry| {
            let chain = chains.get(entry.chain)?;
            let chain_entry = chain.get(entry.position)?;
            Some(UnmatchedCommit {
                fingerprint: chain_entry.fingerprint,
                change_request: chain.change_request().number,
                commit_id: chain_entry.commit.id.clone(),
                summary: chain_entry.commit.summary().to_string(),
            })
        })
        .collect();

    if !unmatched.is_empty() {
        return Err(Error::UnmatchedCommits(unmatched));
    }

    debug!(
        scanned = mainline.len(),
        bound = bound.len(),
        ambiguous = ambiguities.len(),
        "main-line scan complete"
    );

    Ok(Resolution {
        bound,
        ambiguities,
        scanned: mainline.len(),
    })
}
