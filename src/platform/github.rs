//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::{PAGE_SIZE, PlatformService};
use crate::types::{ChangeRequest, Commit, Platform, PlatformConfig, PrState, PullRequest};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use octocrab::Octocrab;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Upper bound on pages fetched from a single list endpoint
const MAX_PAGES: usize = 100;

// REST response types for commit listings

#[derive(Deserialize)]
struct RestCommit {
    sha: String,
    html_url: String,
    commit: RestCommitDetail,
}

#[derive(Deserialize)]
struct RestCommitDetail {
    message: String,
    author: Option<RestGitActor>,
}

#[derive(Deserialize)]
struct RestGitActor {
    date: Option<DateTime<Utc>>,
}

/// Error payload returned by the REST API
#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl From<RestCommit> for Commit {
    fn from(c: RestCommit) -> Self {
        Self {
            id: c.sha,
            message: c.commit.message,
            // Author date is carried over by rebase-merge; committer date is not
            author_date: c.commit.author.and_then(|a| a.date),
            html_url: c.html_url,
        }
    }
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests (commit listings)
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// API base URL for raw requests, without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        let api_base = host.as_ref().map_or_else(
            || "https://api.github.com".to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        let config = PlatformConfig {
            platform: Platform::GitHub,
            owner,
            repo,
            host,
        };
        Self::with_api_base(token, config, &api_base)
    }

    /// Create a service talking to an explicit API base URL
    ///
    /// Used for GitHub Enterprise installs with non-standard API paths and for
    /// pointing the client at a local test server.
    pub fn with_api_base(token: &str, config: PlatformConfig, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("hotfix-pick")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    /// GET a list endpoint page by page until a short page comes back
    ///
    /// Fails rather than truncating when [`MAX_PAGES`] full pages are returned.
    async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = format!("{}{}", self.api_base, path);
        let mut items = Vec::new();

        for page in 1..=MAX_PAGES {
            let response = self
                .http_client
                .get(&url)
                .header("Authorization", format!("Bearer {}", self.token))
                .header("Accept", "application/vnd.github+json")
                .header("X-GitHub-Api-Version", "2022-11-28")
                .query(query)
                .query(&[("per_page", PAGE_SIZE.to_string()), ("page", page.to_string())])
                .send()
                .await
                .map_err(|e| Error::GitHubApi(format!("Failed to fetch {path}: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let detail = serde_json::from_str::<ApiErrorBody>(&body).map_or(body, |e| e.message);
                return Err(Error::GitHubApi(format!(
                    "GET {path} returned {status}: {detail}"
                )));
            }

            let batch: Vec<T> = response
                .json()
                .await
                .map_err(|e| Error::GitHubApi(format!("Failed to parse {path}: {e}")))?;

            let last_page = batch.len() < PAGE_SIZE;
            items.extend(batch);
            if last_page {
                return Ok(items);
            }
        }

        Err(Error::GitHubApi(format!(
            "GET {path} has more than {MAX_PAGES} pages of results"
        )))
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        is_draft: pr.draft.unwrap_or(false),
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_change_request(&self, number: u64) -> Result<ChangeRequest> {
        debug!(pr_number = number, "getting PR");

        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(number)
            .await?;

        let state = match pr.state {
            Some(octocrab::models::IssueState::Open) => PrState::Open,
            _ if pr.merged_at.is_some() => PrState::Merged,
            // IssueState is non-exhaustive, so use wildcard for Closed and any future variants
            Some(_) | None => PrState::Closed,
        };

        let created_at = pr.created_at.ok_or_else(|| {
            Error::GitHubApi(format!("PR #{number} has no creation date"))
        })?;

        let change_request = ChangeRequest {
            number: pr.number,
            title: pr.title.clone().unwrap_or_default(),
            html_url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            state,
            created_at,
            merged_at: pr.merged_at,
        };

        debug!(pr_number = number, state = %change_request.state, "got PR");
        Ok(change_request)
    }

    async fn list_change_request_commits(&self, number: u64) -> Result<Vec<Commit>> {
        debug!(pr_number = number, "listing PR commits");
        let path = format!(
            "/repos/{}/{}/pulls/{}/commits",
            self.config.owner, self.config.repo, number
        );

        // Delivered oldest first
        let commits: Vec<RestCommit> = self.get_paginated(&path, &[]).await?;
        let result: Vec<Commit> = commits.into_iter().map(Into::into).collect();

        debug!(pr_number = number, count = result.len(), "listed PR commits");
        Ok(result)
    }

    async fn list_mainline_commits(
        &self,
        branch: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Commit>> {
        debug!(branch, %since, "listing branch commits");
        let path = format!("/repos/{}/{}/commits", self.config.owner, self.config.repo);
        let query = [
            ("sha", branch.to_string()),
            ("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ];

        // Delivered newest first
        let commits: Vec<RestCommit> = self.get_paginated(&path, &query).await?;
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
        debug!(head, base, draft, "creating PR");
        let pulls = self.client.pulls(&self.config.owner, &self.config.repo);
        let mut builder = pulls.create(title, head, base).draft(draft);

        if let Some(body_text) = body {
            builder = builder.body(body_text);
        }

        let pr = builder.send().await?;

        let result = pr_from_octocrab(&pr);
        debug!(pr_number = result.number, "created PR");
        Ok(result)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
