//! GitLab platform service implementation

use crate::error::{Error, Result};
use crate::platform::{PAGE_SIZE, PlatformService};
use crate::types::{ChangeRequest, Commit, Platform, PlatformConfig, PrState, PullRequest};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Upper bound on pages fetched from a single list endpoint
const MAX_PAGES: usize = 100;

/// GitLab service using reqwest
pub struct GitLabService {
    client: Client,
    token: String,
    api_base: String,
    config: PlatformConfig,
    project_path: String,
}

#[derive(Deserialize)]
struct MergeRequest {
    iid: u64,
    web_url: String,
    source_branch: String,
    target_branch: String,
    title: String,
    #[serde(default)]
    draft: bool,
}

/// MR details needed for hotfix planning
#[derive(Deserialize)]
struct MergeRequestDetails {
    iid: u64,
    title: String,
    state: String, // "opened", "closed", "merged", "locked"
    web_url: String,
    created_at: DateTime<Utc>,
    merged_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct GitLabCommit {
    id: String,
    message: String,
    authored_date: Option<DateTime<Utc>>,
    web_url: String,
}

impl From<MergeRequest> for PullRequest {
    fn from(mr: MergeRequest) -> Self {
        Self {
            number: mr.iid,
            html_url: mr.web_url,
            base_ref: mr.target_branch,
            head_ref: mr.source_branch,
            title: mr.title,
            is_draft: mr.draft,
        }
    }
}

impl From<MergeRequestDetails> for ChangeRequest {
    fn from(mr: MergeRequestDetails) -> Self {
        let state = match mr.state.as_str() {
            "merged" => PrState::Merged,
            "opened" => PrState::Open,
            _ => PrState::Closed,
        };
        Self {
            number: mr.iid,
            title: mr.title,
            html_url: mr.web_url,
            state,
            created_at: mr.created_at,
            merged_at: mr.merged_at,
        }
    }
}

impl From<GitLabCommit> for Commit {
    fn from(c: GitLabCommit) -> Self {
        Self {
            id: c.id,
            message: c.message,
            author_date: c.authored_date,
            html_url: c.web_url,
        }
    }
}

#[derive(Serialize)]
struct CreateMrPayload {
    source_branch: String,
    target_branch: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    draft: Option<bool>,
}

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl GitLabService {
    /// Create a new GitLab service
    pub fn new(token: String, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        let host = host.unwrap_or_else(|| "gitlab.com".to_string());
        let api_base = format!("https://{host}/api/v4");

        let config_host = if host == "gitlab.com" {
            None
        } else {
            Some(host)
        };

        let config = PlatformConfig {
            platform: Platform::GitLab,
            owner,
            repo,
            host: config_host,
        };
        Self::with_api_base(token, config, &api_base)
    }

    /// Create a service talking to an explicit `/api/v4` base URL
    pub fn with_api_base(token: String, config: PlatformConfig, api_base: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::GitLabApi(format!("failed to create HTTP client: {e}")))?;

        let project_path = format!("{}/{}", config.owner, config.repo);

        Ok(Self {
            client,
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
            config,
            project_path,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn encoded_project(&self) -> String {
        urlencoding::encode(&self.project_path).into_owned()
    }

    async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.api_url(path);
        let mut items = Vec::new();

        for page in 1..=MAX_PAGES {
            let batch: Vec<T> = self
                .client
                .get(&url)
                .header("PRIVATE-TOKEN", &self.token)
                .query(query)
                .query(&[("per_page", PAGE_SIZE.to_string()), ("page", page.to_string())])
                .send()
                .await?
                .error_for_status()
                .map_err(|e| Error::GitLabApi(e.to_string()))?
                .json()
                .await?;

            let last_page = batch.len() < PAGE_SIZE;
            items.extend(batch);
            if last_page {
                return Ok(items);
            }
        }

        Err(Error::GitLabApi(format!(
            "GET {path} has more than {MAX_PAGES} pages of results"
        )))
    }
}

#[async_trait]
impl PlatformService for GitLabService {
    async fn get_change_request(&self, number: u64) -> Result<ChangeRequest> {
        debug!(mr_iid = number, "getting MR");
        let url = self.api_url(&format!(
            "/projects/{}/merge_requests/{}",
            self.encoded_project(),
            number
        ));

        let mr: MergeRequestDetails = self
            .client
            .get(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?
            .json()
            .await?;

        let change_request: ChangeRequest = mr.into();
        debug!(mr_iid = number, state = %change_request.state, "got MR");
        Ok(change_request)
    }

    async fn list_change_request_commits(&self, number: u64) -> Result<Vec<Commit>> {
        debug!(mr_iid = number, "listing MR commits");
        let path = format!(
            "/projects/{}/merge_requests/{}/commits",
            self.encoded_project(),
            number
        );

        // Delivered newest first
        let commits: Vec<GitLabCommit> = self.get_paginated(&path, &[]).await?;
        let result: Vec<Commit> = commits.into_iter().rev().map(Into::into).collect();

        debug!(mr_iid = number, count = result.len(), "listed MR commits");
        Ok(result)
    }

    async fn list_mainline_commits(
        &self,
        branch: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Commit>> {
        debug!(branch, %since, "listing branch commits");
        let path = format!("/projects/{}/repository/commits", self.encoded_project());
        let query = [
            ("ref_name", branch.to_string()),
            ("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ];

        // Delivered newest first
        let commits: Vec<GitLabCommit> = self.get_paginated(&path, &query).await?;
        let result: Vec<Commit> = commits.into_iter().rev().map(Into::into).collect();

        debug!(branch, count = result.len(), "listed branch commits");
        Ok(result)
    }

    async fn create_pr_with_options(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: Option<&str>,
        draft: bool,
    ) -> Result<PullRequest> {
        debug!(head, base, draft, "creating MR");
        let url = self.api_url(&format!(
            "/projects/{}/merge_requests",
            self.encoded_project()
        ));

        let payload = CreateMrPayload {
            source_branch: head.to_string(),
            target_branch: base.to_string(),
            title: title.to_string(),
            description: body.map(ToString::to_string),
            draft: if draft { Some(true) } else { None },
        };

        let mr: MergeRequest = self
            .client
            .post(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(&payload)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?
            .json()
            .await?;

        let pr: PullRequest = mr.into();
        debug!(mr_iid = pr.number, "created MR");
        Ok(pr)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
