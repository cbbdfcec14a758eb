//! Command implementations for the `hotfix` binary

mod auth;
pub mod context;
mod hotfix;
pub mod style;

pub use auth::{AuthPlatform, run_auth};
pub use hotfix::{HotfixOptions, run_hotfix};

use anstream::println;
use async_trait::async_trait;
use hotfix_pick::hotfix::ProgressCallback;
use style::{Stylize, arrow};

/// Progress output for interactive runs
pub struct CliProgress {
    indent: &'static str,
}

impl CliProgress {
    /// One line per step, indented under the current heading
    pub const fn compact() -> Self {
        Self { indent: "  " }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_message(&self, message: &str) {
        println!("{}{} {message}", self.indent, arrow());
    }

    async fn on_warning(&self, message: &str) {
        println!("{}{}", self.indent, format!("⚠ {message}").warn());
    }
}
