//! Shared command context for CLI commands

use hotfix_pick::config::{Settings, load_settings};
use hotfix_pick::error::{Error, Result};
use hotfix_pick::platform::{PlatformService, create_platform_service, parse_repo_info};
use hotfix_pick::repo::{GitRepo, select_remote};
use hotfix_pick::types::PlatformConfig;
use std::path::{Path, PathBuf};

/// Shared context for commands that talk to the hosting platform
///
/// Opens the repository, loads settings, selects the remote, detects the
/// platform from its URL and builds the authenticated service.
pub struct CommandContext {
    /// Working tree root
    pub repo_root: PathBuf,
    /// Settings loaded from disk
    pub settings: Settings,
    /// Platform service (GitHub/GitLab)
    pub platform: Box<dyn PlatformService>,
    /// Selected remote name
    pub remote_name: String,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// An explicit `remote` wins over the `remote` setting.
    pub async fn new(path: &Path, remote: Option<&str>) -> Result<Self> {
        let (repo_root, settings, remote_name, platform_config) = locate(path, remote)?;
        let platform = create_platform_service(&platform_config).await?;

        Ok(Self {
            repo_root,
            settings,
            platform,
            remote_name,
        })
    }
}

/// Repository, settings and platform identity without authenticating
pub fn locate(
    path: &Path,
    remote: Option<&str>,
) -> Result<(PathBuf, Settings, String, PlatformConfig)> {
    let repo = GitRepo::discover(path)?;
    let repo_root = repo.root().to_path_buf();
    let settings = load_settings(&repo_root)?;

    let remotes = repo.remotes()?;
    let requested = remote.or(settings.remote.as_deref());
    let remote_name = select_remote(&remotes, requested)?;

    let remote_info = remotes
        .iter()
        .find(|r| r.name == remote_name)
        .ok_or_else(|| Error::RemoteNotFound(remote_name.clone()))?;
    let platform_config = parse_repo_info(&remote_info.url)?;

    Ok((repo_root, settings, remote_name, platform_config))
}
