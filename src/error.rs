//! Error types for hotfix-pick
//!
//! Every error is terminal for a run. [`Error::kind`] groups variants into the
//! categories the CLI reports and maps to exit codes.

use crate::hotfix::Fingerprint;
use std::fmt;
use thiserror::Error;

/// Exit codes for the `hotfix` binary
pub mod exit_codes {
    /// Bad arguments, configuration, or repository setup
    pub const USAGE: i32 = 2;
    /// No merged change request left to process
    pub const EMPTY_INPUT: i32 = 3;
    /// One or more change request commits could not be found on the main line
    pub const UNMATCHED: i32 = 4;
    /// Hosted API or git process failure
    pub const UPSTREAM: i32 = 5;
}

/// Broad category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Change request commits without a main-line counterpart
    UnmatchedCommit,
    /// An external collaborator (API, git process) failed
    UpstreamFetchFailure,
    /// No change request survived filtering
    EmptyInputSet,
    /// Invalid input or local environment
    Usage,
}

/// A change request commit that has no rewritten counterpart on the main line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedCommit {
    /// Content fingerprint that was not found
    pub fingerprint: Fingerprint,
    /// Number of the change request owning the commit
    pub change_request: u64,
    /// Original (pre-merge) commit id
    pub commit_id: String,
    /// First line of the commit message
    pub summary: String,
}

impl fmt::Display for UnmatchedCommit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} \"{}\"",
            self.change_request,
            self.fingerprint,
            short_id(&self.commit_id),
            self.summary
        )
    }
}

fn short_id(id: &str) -> &str {
    id.get(..12).unwrap_or(id)
}

fn format_unmatched(commits: &[UnmatchedCommit]) -> String {
    commits
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_numbers(numbers: &[u64]) -> String {
    numbers
        .iter()
        .map(|n| format!("#{n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// Matching left change request commits unbound
    #[error(
        "{} commit(s) could not be matched on the main line: {}",
        .0.len(),
        format_unmatched(.0)
    )]
    UnmatchedCommits(Vec<UnmatchedCommit>),

    /// None of the requested change requests is merged
    #[error("no merged pull requests to build a hotfix from")]
    NoMergedChangeRequests,

    /// Every merged change request is empty
    #[error("merged pull request(s) {} have no commits to replay", format_numbers(.0))]
    NoCommitsToReplay(Vec<u64>),

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// GitLab API error
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// Octocrab transport or API error
    #[error("GitHub API error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A git command failed
    #[error("git {command} failed: {message}")]
    Git {
        /// The git subcommand and arguments that were run
        command: String,
        /// Captured stderr or spawn error
        message: String,
    },

    /// Cherry-picking a commit onto the hotfix branch failed
    #[error("replay of {commit} failed after {applied} applied commit(s): {message}")]
    Replay {
        /// Main-line commit that failed to apply
        commit: String,
        /// Number of commits applied before the failure
        applied: usize,
        /// Underlying git message
        message: String,
    },

    /// Repository discovery or inspection error
    #[error("repository error: {0}")]
    Repository(String),

    /// No remote points at a supported platform
    #[error("no supported remotes found (GitHub or GitLab)")]
    NoSupportedRemotes,

    /// Named remote does not exist
    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    /// Authentication token could not be resolved
    #[error("authentication error: {0}")]
    Auth(String),

    /// Settings file could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid command-line input
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Category of this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnmatchedCommits(_) => ErrorKind::UnmatchedCommit,
            Self::NoMergedChangeRequests | Self::NoCommitsToReplay(_) => ErrorKind::EmptyInputSet,
            Self::GitHubApi(_)
            | Self::GitLabApi(_)
            | Self::Octocrab(_)
            | Self::Http(_)
            | Self::Git { .. }
            | Self::Replay { .. } => ErrorKind::UpstreamFetchFailure,
            Self::Repository(_)
            | Self::NoSupportedRemotes
            | Self::RemoteNotFound(_)
            | Self::Auth(_)
            | Self::Config(_)
            | Self::InvalidArgument(_)
            | Self::Internal(_) => ErrorKind::Usage,
        }
    }

    /// Process exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::UnmatchedCommit => exit_codes::UNMATCHED,
            ErrorKind::UpstreamFetchFailure => exit_codes::UPSTREAM,
            ErrorKind::EmptyInputSet => exit_codes::EMPTY_INPUT,
            ErrorKind::Usage => exit_codes::USAGE,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
