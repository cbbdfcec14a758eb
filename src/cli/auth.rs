//! Auth command - check platform credentials

use crate::cli::context::locate;
use crate::cli::style::{Stylize, check};
use anstream::println;
use hotfix_pick::auth::{get_github_auth, get_gitlab_auth, test_github_auth, test_gitlab_auth};
use hotfix_pick::error::Result;
use hotfix_pick::types::Platform;
use std::path::Path;
use tracing::debug;

/// Platform whose credentials to check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPlatform {
    /// GitHub or GitHub Enterprise
    GitHub,
    /// GitLab or self-hosted GitLab
    GitLab,
}

impl From<AuthPlatform> for Platform {
    fn from(platform: AuthPlatform) -> Self {
        match platform {
            AuthPlatform::GitHub => Self::GitHub,
            AuthPlatform::GitLab => Self::GitLab,
        }
    }
}

/// Run the auth command
///
/// Uses the host of the current repository's remote when it belongs to the
/// requested platform, the public instance otherwise.
pub async fn run_auth(path: &Path, platform: AuthPlatform) -> Result<()> {
    let host = match locate(path, None) {
        Ok((_, _, _, config)) if config.platform == Platform::from(platform) => config.host,
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "no repository context, checking public instance");
            None
        }
    };

    let (login, source) = match platform {
        AuthPlatform::GitHub => {
            let auth = get_github_auth().await?;
            (test_github_auth(&auth, host.as_deref()).await?, auth.source)
        }
        AuthPlatform::GitLab => {
            let auth = get_gitlab_auth().await?;
            (test_gitlab_auth(&auth, host.as_deref()).await?, auth.source)
        }
    };

    let instance = host.unwrap_or_else(|| match platform {
        AuthPlatform::GitHub => "github.com".to_string(),
        AuthPlatform::GitLab => "gitlab.com".to_string(),
    });
    println!(
        "{} Authenticated to {} as {} {}",
        check(),
        instance.emphasis(),
        login.accent(),
        format!("(via {source})").muted()
    );
    Ok(())
}
