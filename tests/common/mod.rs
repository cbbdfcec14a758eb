//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;
mod mock_replayer;

pub use mock_platform::{CreatePrCall, MainlineCall, MockPlatformService};
pub use mock_replayer::{MockReplayer, ReplayCall};

use chrono::{DateTime, TimeZone, Utc};
use hotfix_pick::hotfix::ChangeRequestCommits;
use hotfix_pick::types::{ChangeRequest, Commit, Platform, PlatformConfig, PrState};

/// 2024-05-`day` at `hour`:00:00 UTC
pub fn ts(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
}

/// A pull request commit authored at `author_date`
pub fn make_commit(id: &str, message: &str, author_date: Option<DateTime<Utc>>) -> Commit {
    Commit {
        id: id.to_string(),
        message: message.to_string(),
        author_date,
        html_url: format!("https://github.com/test/repo/commit/{id}"),
    }
}

/// The main-line copy of `original` after a rebase-merge: same message and
/// author date, new id
pub fn rebased(original: &Commit, new_id: &str) -> Commit {
    Commit {
        id: new_id.to_string(),
        message: original.message.clone(),
        author_date: original.author_date,
        html_url: format!("https://github.com/test/repo/commit/{new_id}"),
    }
}

/// A merged change request
pub fn make_change_request(
    number: u64,
    created_at: DateTime<Utc>,
    merged_at: Option<DateTime<Utc>>,
) -> ChangeRequest {
    ChangeRequest {
        number,
        title: format!("Change {number}"),
        html_url: format!("https://github.com/test/repo/pull/{number}"),
        state: PrState::Merged,
        created_at,
        merged_at,
    }
}

/// A change request that was never merged
pub fn make_unmerged_change_request(number: u64, state: PrState) -> ChangeRequest {
    ChangeRequest {
        state,
        merged_at: None,
        ..make_change_request(number, ts(1, 0), None)
    }
}

/// Change request with its commits, as produced by the gather phase
pub fn gathered(change_request: ChangeRequest, commits: Vec<Commit>) -> ChangeRequestCommits {
    ChangeRequestCommits {
        change_request,
        commits,
    }
}

pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        platform: Platform::GitHub,
        owner: "test".to_string(),
        repo: "repo".to_string(),
        host: None,
    }
}

pub fn gitlab_config() -> PlatformConfig {
    PlatformConfig {
        platform: Platform::GitLab,
        owner: "group/sub".to_string(),
        repo: "repo".to_string(),
        host: None,
    }
}
