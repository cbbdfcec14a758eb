//! Local git repository access
//!
//! Read-only inspection (discovery, remotes) goes through `gix`. Mutating
//! replay steps shell out to the `git` executable via [`GitCli`].

mod git_cli;

pub use git_cli::GitCli;

use crate::error::{Error, Result};
use crate::types::GitRemote;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A discovered git repository
pub struct GitRepo {
    repo: gix::Repository,
    root: PathBuf,
}

impl GitRepo {
    /// Discover the repository containing `path`
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = gix::discover(path).map_err(|e| {
            Error::Repository(format!("no git repository at {}: {e}", path.display()))
        })?;
        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::Repository("bare repositories are not supported".to_string()))?;
        debug!(root = %root.display(), "discovered repository");
        Ok(Self { repo, root })
    }

    /// Working tree root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Configured remotes with their fetch URLs
    pub fn remotes(&self) -> Result<Vec<GitRemote>> {
        let mut remotes = Vec::new();
        for name in self.repo.remote_names() {
            let remote = self
                .repo
                .find_remote(&*name)
                .map_err(|e| Error::Repository(format!("invalid remote {name}: {e}")))?;
            if let Some(url) = remote.url(gix::remote::Direction::Fetch) {
                remotes.push(GitRemote {
                    name: name.to_string(),
                    url: url.to_bstring().to_string(),
                });
            }
        }
        Ok(remotes)
    }
}

/// Pick the remote to work with
///
/// An explicitly requested remote must exist. Otherwise `origin` is preferred,
/// then the first configured remote.
pub fn select_remote(remotes: &[GitRemote], requested: Option<&str>) -> Result<String> {
    if let Some(name) = requested {
        return remotes
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.name.clone())
            .ok_or_else(|| Error::RemoteNotFound(name.to_string()));
    }

    remotes
        .iter()
        .find(|r| r.name == "origin")
        .or_else(|| remotes.first())
        .map(|r| r.name.clone())
        .ok_or(Error::NoSupportedRemotes)
}
