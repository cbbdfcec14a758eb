//! Hotfix engine
//!
//! A run has three phases:
//! 1. Gather - fetch change requests and main-line commits (effectful, bounded)
//! 2. Plan - fingerprint, match, and order (pure, testable)
//! 3. Execute - replay onto a hotfix branch (effectful)

mod chain;
mod execute;
mod fingerprint;
mod gather;
mod index;
mod matcher;
mod plan;
mod progress;
mod sequence;
mod summary;

pub use chain::{ChainEntry, ChangeRequestCommits, CommitChain};
pub use execute::{ReplayOptions, ReplayOutcome, Replayer, execute_replay};
pub use fingerprint::{Fingerprint, canonical_date, fingerprint};
pub use gather::{gather_change_requests, gather_mainline, parse_change_request_numbers};
pub use index::{EntryRef, FingerprintIndex};
pub use matcher::{AmbiguousMatch, Resolution, cutoff_date, resolve};
pub use plan::{
    CommitMatch, HotfixPlan, PlannedChangeRequest, create_hotfix_plan, order_change_requests,
    replay_order,
};
pub use progress::{NoopProgress, ProgressCallback};
pub use sequence::{ReplayStep, replay_sequence, replay_steps, short_sha};
pub use summary::{hotfix_pr_title, render_summary_table};
