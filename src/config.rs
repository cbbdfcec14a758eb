//! Settings files and the per-run hotfix configuration
//!
//! Settings come from `<repo>/.hotfix.toml` and the per-user
//! `<config dir>/hotfix-pick/config.toml`. Command-line flags override the
//! repo file, which overrides the user file.

use crate::error::{Error, Result};
use crate::hotfix::ReplayOptions;
use crate::types::PlatformConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Repo-local settings filename
const REPO_SETTINGS_FILE: &str = ".hotfix.toml";

/// Directory name under the user config dir
const APP_DIR: &str = "hotfix-pick";

/// Per-user settings filename
const USER_SETTINGS_FILE: &str = "config.toml";

/// Default main branch to cherry-pick from
pub const DEFAULT_MAIN_BRANCH: &str = "master";

/// Optional settings read from disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Main branch to cherry-pick from
    pub main_branch: Option<String>,
    /// Remote to fetch from and push to
    pub remote: Option<String>,
    /// Open the hotfix PR as a draft
    pub draft: Option<bool>,
}

impl Settings {
    /// Fill unset fields from `fallback`
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            main_branch: self.main_branch.or(fallback.main_branch),
            remote: self.remote.or(fallback.remote),
            draft: self.draft.or(fallback.draft),
        }
    }
}

/// Path of the repo-local settings file
pub fn repo_settings_path(repo_root: &Path) -> PathBuf {
    repo_root.join(REPO_SETTINGS_FILE)
}

/// Path of the per-user settings file, if a config dir exists
pub fn user_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(USER_SETTINGS_FILE))
}

/// Load a single settings file.
///
/// Returns default settings if the file doesn't exist.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let settings: Settings = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

    debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Load repo settings layered over user settings
pub fn load_settings(repo_root: &Path) -> Result<Settings> {
    let repo = load_settings_file(&repo_settings_path(repo_root))?;
    let user = match user_settings_path() {
        Some(path) => load_settings_file(&path)?,
        None => Settings::default(),
    };
    Ok(repo.or(user))
}

/// Main branch from the command line, then settings, then [`DEFAULT_MAIN_BRANCH`]
pub fn resolve_main_branch(flag: Option<String>, settings: &Settings) -> String {
    flag.or_else(|| settings.main_branch.clone())
        .unwrap_or_else(|| DEFAULT_MAIN_BRANCH.to_string())
}

/// Everything a hotfix run needs, resolved up front
#[derive(Debug, Clone)]
pub struct HotfixConfig {
    /// Repository identity on the hosting platform
    pub platform: PlatformConfig,
    /// Remote to fetch from and push to
    pub remote: String,
    /// Main branch the change requests were merged into
    pub main_branch: String,
    /// Release branch the hotfix is based on
    pub release_branch: String,
    /// Name of the hotfix branch
    pub hotfix_name: String,
    /// Change request numbers, deduplicated, in the order given
    pub change_requests: Vec<u64>,
    /// Open the hotfix PR as a draft
    pub draft: bool,
    /// Push the hotfix branch and open a PR after replay
    pub push: bool,
}

impl HotfixConfig {
    /// Branch and remote names for the replay phase
    pub fn replay_options(&self) -> ReplayOptions {
        ReplayOptions {
            remote: self.remote.clone(),
            release_branch: self.release_branch.clone(),
            hotfix_branch: self.hotfix_name.clone(),
            push: self.push,
        }
    }
}
