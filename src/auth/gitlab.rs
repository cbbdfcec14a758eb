//! GitLab token resolution

use super::{AuthSource, first_env_token};
use crate::error::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

/// Environment variables checked for a GitLab token, in order
const TOKEN_VARS: &[&str] = &["GITLAB_TOKEN", "GL_TOKEN"];

/// Resolved GitLab credentials
#[derive(Debug, Clone)]
pub struct GitLabAuthConfig {
    /// Personal access token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

/// Token from `GITLAB_TOKEN` or `GL_TOKEN`, using `lookup` to read variables
pub fn gitlab_token_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    first_env_token(TOKEN_VARS, lookup)
}

/// Pull the token out of `glab auth status -t` output
fn parse_glab_status(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (_, rest) = line.split_once("Token:")?;
        let token = rest.trim();
        (!token.is_empty()).then(|| token.to_string())
    })
}

/// Resolve a GitLab token from the environment, falling back to `glab auth status -t`
pub async fn get_gitlab_auth() -> Result<GitLabAuthConfig> {
    if let Some(token) = gitlab_token_from_env(|var| std::env::var(var).ok()) {
        debug!("using GitLab token from environment");
        return Ok(GitLabAuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    let output = Command::new("glab")
        .args(["auth", "status", "-t"])
        .output()
        .await
        .map_err(|e| {
            Error::Auth(format!(
                "GITLAB_TOKEN is not set and the glab CLI could not be run: {e}"
            ))
        })?;

    // glab prints status to stderr
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    let token = parse_glab_status(&text).ok_or_else(|| {
        Error::Auth(
            "GITLAB_TOKEN is not set and no token found via glab. Run 'glab auth login' first."
                .to_string(),
        )
    })?;

    debug!("using GitLab token from glab CLI");
    Ok(GitLabAuthConfig {
        token,
        source: AuthSource::Cli,
    })
}

/// Verify the token against the API and return the authenticated username
pub async fn test_gitlab_auth(config: &GitLabAuthConfig, host: Option<&str>) -> Result<String> {
    #[derive(Deserialize)]
    struct User {
        username: String,
    }

    let host = host.unwrap_or("gitlab.com");
    let user: User = Client::new()
        .get(format!("https://{host}/api/v4/user"))
        .header("PRIVATE-TOKEN", &config.token)
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::GitLabApi(e.to_string()))?
        .json()
        .await?;

    Ok(user.username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_glab_status_finds_token() {
        let output = "gitlab.com\n  ✓ Logged in to gitlab.com as dev\n  ✓ Token: glpat-abc123\n";
        assert_eq!(parse_glab_status(output).as_deref(), Some("glpat-abc123"));
    }

    #[test]
    fn test_parse_glab_status_without_token() {
        assert!(parse_glab_status("not logged in").is_none());
    }
}
