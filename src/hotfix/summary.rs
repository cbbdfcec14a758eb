//! Hotfix PR title and body rendering

use crate::hotfix::plan::HotfixPlan;
use crate::hotfix::sequence::replay_steps;

/// Header of the summary table
const TABLE_HEADER: &str = "Pull Request | commit main branch | commit pr \n\
                            ------------ | ------------- | ------------- \n";

/// Markdown table linking each change request to its main-line and original
/// commits, one row per replayed commit, in replay order.
pub fn render_summary_table(plan: &HotfixPlan) -> String {
    let mut body = String::from(TABLE_HEADER);
    for step in replay_steps(plan) {
        body.push_str(&step.change_request.html_url);
        body.push_str(" | ");
        body.push_str(&step.commit_match.mainline_commit.html_url);
        body.push_str(" | ");
        body.push_str(&step.commit_match.change_request_commit.html_url);
        body.push_str(" \n");
    }
    body
}

/// Title of the hotfix pull request
pub fn hotfix_pr_title(hotfix_name: &str) -> String {
    format!("Hotfix {hotfix_name}")
}
