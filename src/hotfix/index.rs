//! Plan-wide fingerprint index
//!
//! Built once from every chain before the main-line scan starts and never
//! mutated afterwards.

use crate::hotfix::chain::CommitChain;
use crate::hotfix::fingerprint::Fingerprint;
use std::collections::HashMap;
use tracing::warn;

/// Location of a chain entry: chain index and position within that chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryRef {
    /// Index into the chain slice the index was built from
    pub chain: usize,
    /// Position within the chain (0 = head)
    pub position: usize,
}

/// Immutable fingerprint → chain entries lookup
///
/// Fingerprints are not assumed unique. Every entry sharing a fingerprint is
/// kept, ordered by chain and then by position.
#[derive(Debug, Clone, Default)]
pub struct FingerprintIndex {
    slots: HashMap<Fingerprint, Vec<EntryRef>>,
    len: usize,
}

impl FingerprintIndex {
    /// Index every entry of every chain
    pub fn build(chains: &[CommitChain]) -> Self {
        let mut slots: HashMap<Fingerprint, Vec<EntryRef>> = HashMap::new();
        let mut len = 0;

        for (chain_idx, chain) in chains.iter().enumerate() {
            for (position, entry) in chain.entries().iter().enumerate() {
                slots.entry(entry.fingerprint).or_default().push(EntryRef {
                    chain: chain_idx,
                    position,
                });
                len += 1;
            }
        }

        let index = Self { slots, len };
        for (fingerprint, refs) in index.collisions() {
            let change_requests: Vec<u64> = refs
                .iter()
                .map(|r| chains[r.chain].change_request().number)
                .collect();
            warn!(
                %fingerprint,
                ?change_requests,
                "fingerprint shared by several pull request commits"
            );
        }
        index
    }

    /// Entries carrying `fingerprint`, in chain order
    pub fn get(&self, fingerprint: Fingerprint) -> Option<&[EntryRef]> {
        self.slots.get(&fingerprint).map(Vec::as_slice)
    }

    /// Fingerprints held by more than one entry, sorted by fingerprint
    pub fn collisions(&self) -> Vec<(Fingerprint, &[EntryRef])> {
        let mut shared: Vec<_> = self
            .slots
            .iter()
            .filter(|(_, refs)| refs.len() > 1)
            .map(|(fp, refs)| (*fp, refs.as_slice()))
            .collect();
        shared.sort_by_key(|(fp, _)| *fp);
        shared
    }

    /// Every indexed entry, in chain order then position
    pub fn entries(&self) -> Vec<EntryRef> {
        let mut all: Vec<EntryRef> = self.slots.values().flatten().copied().collect();
        all.sort();
        all
    }

    /// Total number of indexed entries
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no entries were indexed
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}
