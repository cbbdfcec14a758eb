//! Gather phase - fetch change requests and main-line history
//!
//! Effectful but bounded: one metadata call and one commit listing per change
//! request, then a single main-line listing. Any failure aborts the run.

use crate::error::{Error, Result};
use crate::hotfix::chain::ChangeRequestCommits;
use crate::hotfix::matcher::cutoff_date;
use crate::hotfix::progress::ProgressCallback;
use crate::platform::PlatformService;
use crate::types::{ChangeRequest, Commit};
use tracing::{debug, warn};

/// Parse a change request list such as `"#42,#164"` or `"42, 164"`.
///
/// Duplicates are dropped, keeping the first occurrence.
pub fn parse_change_request_numbers(raw: &str) -> Result<Vec<u64>> {
    let mut numbers = Vec::new();
    for part in raw.split(',') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let number: u64 = digits.parse().map_err(|_| {
            Error::InvalidArgument(format!("'{trimmed}' is not a pull request number"))
        })?;
        if !numbers.contains(&number) {
            numbers.push(number);
        }
    }

    if numbers.is_empty() {
        return Err(Error::InvalidArgument(
            "no pull requests given, e.g. '#42,#164'".to_string(),
        ));
    }
    Ok(numbers)
}

/// Fetch merged change requests and their commits.
///
/// Non-merged change requests are skipped with a warning. Returns
/// [`Error::NoMergedChangeRequests`] when none is left.
pub async fn gather_change_requests(
    platform: &dyn PlatformService,
    numbers: &[u64],
    progress: &dyn ProgressCallback,
) -> Result<Vec<ChangeRequestCommits>> {
    let mut gathered = Vec::with_capacity(numbers.len());

    for &number in numbers {
        let change_request = platform.get_change_request(number).await?;
        if !change_request.is_merged() {
            warn!(number, state = %change_request.state, "skipping non-merged pull request");
            progress
                .on_warning(&format!(
                    "Non-merged PR #{number} can't be added to hotfix. PR has state: {}",
                    change_request.state
                ))
                .await;
            continue;
        }

        let commits = platform.list_change_request_commits(number).await?;
        debug!(number, commits = commits.len(), "gathered pull request");
        if commits.is_empty() {
            progress
                .on_warning(&format!("PR #{number} has no commits"))
                .await;
        }
        gathered.push(ChangeRequestCommits {
            change_request,
            commits,
        });
    }

    if gathered.is_empty() {
        return Err(Error::NoMergedChangeRequests);
    }
    Ok(gathered)
}

/// Fetch main-line commits since the earliest change request creation date.
pub async fn gather_mainline(
    platform: &dyn PlatformService,
    branch: &str,
    gathered: &[ChangeRequestCommits],
) -> Result<Vec<Commit>> {
    let change_requests: Vec<ChangeRequest> = gathered
        .iter()
        .map(|g| g.change_request.clone())
        .collect();
    let since = cutoff_date(&change_requests).ok_or(Error::NoMergedChangeRequests)?;

    debug!(branch, %since, "listing main-line commits");
    platform.list_mainline_commits(branch, since).await
}
