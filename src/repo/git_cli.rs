//! Replay through the `git` executable

use crate::error::{Error, Result};
use crate::hotfix::Replayer;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Runs git commands in a working tree
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Run git inside `workdir`
    pub fn new(workdir: &Path) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
        }
    }

    /// Run `git <args>` and return trimmed stdout
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        debug!(%command, "running git");

        let output = Command::new("git")
            .current_dir(&self.workdir)
            .args(args)
            .output()
            .map_err(|e| Error::Git {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::Git {
                command,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Replayer for GitCli {
    fn ensure_clean(&self) -> Result<()> {
        // Untracked files do not block a cherry-pick
        let status = self.run(&["status", "--porcelain", "--untracked-files=no"])?;
        if status.is_empty() {
            Ok(())
        } else {
            Err(Error::Git {
                command: "status --porcelain --untracked-files=no".to_string(),
                message: "working tree has uncommitted changes".to_string(),
            })
        }
    }

    fn prepare_branch(
        &self,
        remote: &str,
        release_branch: &str,
        hotfix_branch: &str,
    ) -> Result<()> {
        self.run(&["fetch", remote])?;
        self.run(&["checkout", release_branch])?;
        self.run(&["pull", "--ff-only", remote, release_branch])?;
        self.run(&["checkout", "-b", hotfix_branch])?;
        Ok(())
    }

    fn cherry_pick(&self, commit_id: &str) -> Result<()> {
        self.run(&["cherry-pick", commit_id]).map(|_| ())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["push", "-u", remote, branch]).map(|_| ())
    }
}
