//! Core types for hotfix-pick

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit as delivered by the hosted review API
///
/// `id` changes when a commit is rebased or squashed, so it is never used to
/// match a pull request commit against the main line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Commit {
    /// Commit SHA (hex)
    pub id: String,
    /// Full commit message
    pub message: String,
    /// Author date; survives rebase-merges, unlike the committer date
    pub author_date: Option<DateTime<Utc>>,
    /// Web URL for the commit
    pub html_url: String,
}

impl Commit {
    /// First line of the commit message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

/// PR state (open, closed, merged)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrState {
    /// PR is still open
    Open,
    /// PR was closed without merging
    Closed,
    /// PR was merged
    Merged,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// A change request (GitHub pull request / GitLab merge request)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeRequest {
    /// PR/MR number
    pub number: u64,
    /// PR/MR title
    pub title: String,
    /// Web URL for the PR/MR
    pub html_url: String,
    /// Current state
    pub state: PrState,
    /// When the PR/MR was opened
    pub created_at: DateTime<Utc>,
    /// When the PR/MR was merged, if it was
    pub merged_at: Option<DateTime<Utc>>,
}

impl ChangeRequest {
    /// Whether this change request has been merged into its target
    pub fn is_merged(&self) -> bool {
        self.state == PrState::Merged
    }
}

/// A pull request created by this tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR/MR number
    pub number: u64,
    /// Web URL for the PR/MR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR/MR title
    pub title: String,
    /// Whether PR is a draft
    pub is_draft: bool,
}

/// A git remote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRemote {
    /// Remote name (e.g., "origin")
    pub name: String,
    /// Remote URL
    pub url: String,
}

/// Detected platform type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    /// GitHub or GitHub Enterprise
    GitHub,
    /// GitLab or self-hosted GitLab
    GitLab,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GitHub => write!(f, "GitHub"),
            Self::GitLab => write!(f, "GitLab"),
        }
    }
}

/// Repository identity on the hosting platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Platform type
    pub platform: Platform,
    /// Repository owner (user, organization, or GitLab group path)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com/gitlab.com)
    pub host: Option<String>,
}
