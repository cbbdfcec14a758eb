//! hotfix-pick - assemble hotfix branches from merged pull requests
//!
//! Merged pull requests land on the main line with rewritten commit hashes.
//! This crate re-associates each pull request commit with its main-line
//! counterpart by content fingerprint, orders the matches for replay, and
//! drives `git cherry-pick` to build a hotfix branch on top of a release line.

pub mod auth;
pub mod config;
pub mod error;
pub mod hotfix;
pub mod platform;
pub mod repo;
pub mod types;
