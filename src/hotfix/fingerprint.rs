//! Content fingerprints that survive rebase and squash merges
//!
//! Commit SHAs change when a pull request is rebase-merged, but the message
//! and the author date are carried over. Hashing both gives a stable identity
//! for matching a pull request commit with its main-line counterpart.

use crate::types::Commit;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit content identity of a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fingerprint(u32);

impl Fingerprint {
    /// Fingerprint a commit from its message and author date
    pub fn of_commit(commit: &Commit) -> Self {
        fingerprint(&commit.message, commit.author_date.as_ref())
    }

    /// Raw hash value
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for Fingerprint {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// Compute the fingerprint of a commit message and optional author date.
///
/// The message bytes are hashed first, then the date in RFC 3339 UTC with
/// second precision. Without a date the fingerprint covers the message only,
/// so two commits with identical messages collide.
pub fn fingerprint(message: &str, author_date: Option<&DateTime<Utc>>) -> Fingerprint {
    let mut hasher = Fnv1a32::new();
    hasher.write(message.as_bytes());
    if let Some(date) = author_date {
        hasher.write(canonical_date(date).as_bytes());
    }
    Fingerprint(hasher.finish())
}

/// Canonical string form of an author date used for fingerprinting
pub fn canonical_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// FNV-1a, 32-bit variant
struct Fnv1a32(u32);

impl Fnv1a32 {
    const fn new() -> Self {
        Self(FNV_OFFSET_BASIS)
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 ^= u32::from(byte);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }

    const fn finish(&self) -> u32 {
        self.0
    }
}
