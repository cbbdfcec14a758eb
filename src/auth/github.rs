//! GitHub token resolution

use super::{AuthSource, first_env_token};
use crate::error::{Error, Result};
use octocrab::Octocrab;
use tokio::process::Command;
use tracing::debug;

/// Environment variables checked for a GitHub token, in order
const TOKEN_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// Resolved GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Personal access or OAuth token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

/// Token from `GITHUB_TOKEN` or `GH_TOKEN`, using `lookup` to read variables
pub fn github_token_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    first_env_token(TOKEN_VARS, lookup)
}

/// Resolve a GitHub token from the environment, falling back to `gh auth token`
pub async fn get_github_auth() -> Result<GitHubAuthConfig> {
    if let Some(token) = github_token_from_env(|var| std::env::var(var).ok()) {
        debug!("using GitHub token from environment");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .map_err(|e| {
            Error::Auth(format!(
                "GITHUB_TOKEN is not set and the gh CLI could not be run: {e}"
            ))
        })?;

    if !output.status.success() {
        return Err(Error::Auth(
            "GITHUB_TOKEN is not set and 'gh auth token' failed. Run 'gh auth login' first."
                .to_string(),
        ));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(Error::Auth("'gh auth token' returned no token".to_string()));
    }

    debug!("using GitHub token from gh CLI");
    Ok(GitHubAuthConfig {
        token,
        source: AuthSource::Cli,
    })
}

/// Verify the token against the API and return the authenticated login
pub async fn test_github_auth(config: &GitHubAuthConfig, host: Option<&str>) -> Result<String> {
    let mut builder = Octocrab::builder().personal_token(config.token.clone());
    if let Some(h) = host {
        builder = builder
            .base_uri(format!("https://{h}/api/v3"))
            .map_err(|e| Error::GitHubApi(e.to_string()))?;
    }
    let client = builder
        .build()
        .map_err(|e| Error::GitHubApi(e.to_string()))?;

    let user = client.current().user().await?;
    Ok(user.login)
}
