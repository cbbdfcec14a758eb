//! Authentication for GitHub and GitLab
//!
//! Supports CLI-based auth (gh, glab) and environment variables.

mod github;
mod gitlab;

pub use github::{GitHubAuthConfig, get_github_auth, github_token_from_env, test_github_auth};
pub use gitlab::{GitLabAuthConfig, get_gitlab_auth, gitlab_token_from_env, test_gitlab_auth};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from CLI tool (gh or glab)
    Cli,
    /// Token from environment variable
    EnvVar,
}

impl std::fmt::Display for AuthSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::EnvVar => write!(f, "environment variable"),
        }
    }
}

/// First non-empty value among `vars`, as seen by `lookup`
fn first_env_token(vars: &[&str], lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    vars.iter()
        .filter_map(|var| lookup(var))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
