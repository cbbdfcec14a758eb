//! Mock platform service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hotfix_pick::error::{Error, Result};
use hotfix_pick::platform::PlatformService;
use hotfix_pick::types::{ChangeRequest, Commit, PlatformConfig, PullRequest};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_pr_with_options`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: Option<String>,
    pub draft: bool,
}

/// Call record for `list_mainline_commits`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainlineCall {
    pub branch: String,
    pub since: DateTime<Utc>,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Configurable change requests, commit lists and main-line history
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    next_pr_number: AtomicU64,
    change_requests: Mutex<HashMap<u64, ChangeRequest>>,
    change_request_commits: Mutex<HashMap<u64, Vec<Commit>>>,
    mainline: Mutex<Vec<Commit>>,
    // Call tracking
    get_change_request_calls: Mutex<Vec<u64>>,
    list_commits_calls: Mutex<Vec<u64>>,
    mainline_calls: Mutex<Vec<MainlineCall>>,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    // Error injection
    error_on_get_change_request: Mutex<Option<String>>,
    error_on_mainline: Mutex<Option<String>>,
    error_on_create_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            next_pr_number: AtomicU64::new(1000),
            change_requests: Mutex::new(HashMap::new()),
            change_request_commits: Mutex::new(HashMap::new()),
            mainline: Mutex::new(Vec::new()),
            get_change_request_calls: Mutex::new(Vec::new()),
            list_commits_calls: Mutex::new(Vec::new()),
            mainline_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            error_on_get_change_request: Mutex::new(None),
            error_on_mainline: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
        }
    }

    // === Error injection methods ===

    /// Make `get_change_request` return an error
    pub fn fail_get_change_request(&self, msg: &str) {
        *self.error_on_get_change_request.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_mainline_commits` return an error
    pub fn fail_mainline(&self, msg: &str) {
        *self.error_on_mainline.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr_with_options` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    // === Response setup ===

    /// Register a change request and its commits (oldest first)
    pub fn add_change_request(&self, change_request: ChangeRequest, commits: Vec<Commit>) {
        let number = change_request.number;
        self.change_requests
            .lock()
            .unwrap()
            .insert(number, change_request);
        self.change_request_commits
            .lock()
            .unwrap()
            .insert(number, commits);
    }

    /// Set the main-line history (oldest first)
    pub fn set_mainline(&self, commits: Vec<Commit>) {
        *self.mainline.lock().unwrap() = commits;
    }

    // === Call verification methods ===

    /// Get all numbers `get_change_request` was called with
    pub fn get_change_request_calls(&self) -> Vec<u64> {
        self.get_change_request_calls.lock().unwrap().clone()
    }

    /// Get all numbers `list_change_request_commits` was called with
    pub fn get_list_commits_calls(&self) -> Vec<u64> {
        self.list_commits_calls.lock().unwrap().clone()
    }

    /// Get all `list_mainline_commits` calls
    pub fn get_mainline_calls(&self) -> Vec<MainlineCall> {
        self.mainline_calls.lock().unwrap().clone()
    }

    /// Get all `create_pr_with_options` calls
    pub fn get_create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Assert that a PR was opened from `head` into `base`
    pub fn assert_create_pr_called(&self, head: &str, base: &str) {
        let calls = self.get_create_pr_calls();
        assert!(
            calls.iter().any(|c| c.head == head && c.base == base),
            "Expected create_pr({head}, {base}) but got: {calls:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_change_request(&self, number: u64) -> Result<ChangeRequest> {
        self.get_change_request_calls.lock().unwrap().push(number);

        if let Some(msg) = self.error_on_get_change_request.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let responses = self.change_requests.lock().unwrap();
        responses.get(&number).cloned().ok_or_else(|| {
            Error::GitHubApi(format!("GET /pulls/{number} returned 404 Not Found"))
        })
    }

    async fn list_change_request_commits(&self, number: u64) -> Result<Vec<Commit>> {
        self.list_commits_calls.lock().unwrap().push(number);

        let responses = self.change_request_commits.lock().unwrap();
        Ok(responses.get(&number).cloned().unwrap_or_default())
    }

    async fn list_mainline_commits(
        &self,
        branch: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Commit>> {
        self.mainline_calls.lock().unwrap().push(MainlineCall {
            branch: branch.to_string(),
            since,
        });

        if let Some(msg) = self.error_on_mainline.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(self.mainline.lock().unwrap().clone())
    }

    async fn create_pr_with_options(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: Option<&str>,
        draft: bool,
    ) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.map(ToString::to_string),
            draft,
        });

        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            html_url: format!("https://github.com/test/repo/pull/{number}"),
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            title: title.to_string(),
            is_draft: draft,
        })
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
