//! Platform detection from git remote URLs

use crate::error::{Error, Result};
use crate::types::{Platform, PlatformConfig};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// scp-like ssh syntax: `[user@]host:path`
static SCP_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[^@/]+@)?(?P<host>[^:/]+):(?P<path>[^/].*)$").expect("valid regex")
});

/// Detect the platform from a remote URL without parsing owner/repo
pub fn detect_platform(url: &str) -> Option<Platform> {
    let (host, _) = split_remote_url(url)?;
    platform_for_host(&host)
}

/// Parse a remote URL into a platform configuration
///
/// Supports https and ssh URLs, scp-like `git@host:owner/repo.git`, and
/// nested GitLab groups (`group/subgroup/repo`).
pub fn parse_repo_info(url: &str) -> Result<PlatformConfig> {
    let (host, path) = split_remote_url(url).ok_or(Error::NoSupportedRemotes)?;
    let platform = platform_for_host(&host).ok_or(Error::NoSupportedRemotes)?;

    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let repo = segments
        .pop()
        .map(|r| r.strip_suffix(".git").unwrap_or(r).to_string())
        .filter(|r| !r.is_empty())
        .ok_or(Error::NoSupportedRemotes)?;
    if segments.is_empty() {
        return Err(Error::NoSupportedRemotes);
    }
    let owner = segments.join("/");

    let default_host = match platform {
        Platform::GitHub => "github.com",
        Platform::GitLab => "gitlab.com",
    };
    let host = (host != default_host).then_some(host);

    Ok(PlatformConfig {
        platform,
        owner,
        repo,
        host,
    })
}

/// Split a remote URL into (host, path)
fn split_remote_url(url: &str) -> Option<(String, String)> {
    let url = url.trim();
    if let Ok(parsed) = Url::parse(url)
        && let Some(host) = parsed.host_str()
    {
        return Some((host.to_lowercase(), parsed.path().to_string()));
    }

    let captures = SCP_LIKE.captures(url)?;
    Some((
        captures["host"].to_lowercase(),
        captures["path"].to_string(),
    ))
}

fn platform_for_host(host: &str) -> Option<Platform> {
    let env_host = |var: &str| {
        std::env::var(var)
            .ok()
            .is_some_and(|h| h.trim().eq_ignore_ascii_case(host))
    };

    if host == "github.com" || env_host("GH_HOST") {
        Some(Platform::GitHub)
    } else if host == "gitlab.com" || env_host("GITLAB_HOST") {
        Some(Platform::GitLab)
    } else if host.contains("github") {
        Some(Platform::GitHub)
    } else if host.contains("gitlab") {
        Some(Platform::GitLab)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_scp_like() {
        let (host, path) = split_remote_url("git@github.com:owner/repo.git").unwrap();
        assert_eq!(host, "github.com");
        assert_eq!(path, "owner/repo.git");
    }

    #[test]
    fn test_split_ssh_scheme() {
        let (host, path) = split_remote_url("ssh://git@gitlab.com/group/repo.git").unwrap();
        assert_eq!(host, "gitlab.com");
        assert_eq!(path, "/group/repo.git");
    }

    #[test]
    fn test_split_rejects_local_path() {
        assert!(split_remote_url("/srv/git/repo.git").is_none());
    }
}
