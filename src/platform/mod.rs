//! Platform services for GitHub and GitLab
//!
//! Provides a unified interface for the PR/MR reads the hotfix engine needs
//! and for opening the hotfix PR itself.

mod detection;
mod factory;
mod github;
mod gitlab;

pub use detection::{detect_platform, parse_repo_info};
pub use factory::create_platform_service;
pub use github::GitHubService;
pub use gitlab::GitLabService;

use crate::error::Result;
use crate::types::{ChangeRequest, Commit, PlatformConfig, PullRequest};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Page size requested from list endpoints
pub(crate) const PAGE_SIZE: usize = 100;

/// Platform service trait for PR/MR operations
///
/// This trait abstracts GitHub and GitLab operations, allowing the same
/// hotfix logic to work with either platform. Listings are returned
/// oldest-first regardless of the order the API delivers them in.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Get a PR/MR with its state and creation/merge timestamps
    async fn get_change_request(&self, number: u64) -> Result<ChangeRequest>;

    /// List the commits of a PR/MR, oldest first
    async fn list_change_request_commits(&self, number: u64) -> Result<Vec<Commit>>;

    /// List commits on `branch` made since `since`, oldest first
    async fn list_mainline_commits(&self, branch: &str, since: DateTime<Utc>)
    -> Result<Vec<Commit>>;

    /// Create a new PR with explicit body and draft options.
    async fn create_pr_with_options(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: Option<&str>,
        draft: bool,
    ) -> Result<PullRequest>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
