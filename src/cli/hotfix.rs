//! Create command - build a hotfix branch from merged PRs

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, hyperlink, spinner_style};
use anstream::println;
use async_trait::async_trait;
use dialoguer::Confirm;
use hotfix_pick::config::{HotfixConfig, resolve_main_branch};
use hotfix_pick::error::{Error, Result};
use hotfix_pick::hotfix::{
    HotfixPlan, ProgressCallback, create_hotfix_plan, execute_replay, gather_change_requests,
    gather_mainline, hotfix_pr_title, parse_change_request_numbers, render_summary_table,
    replay_steps, short_sha,
};
use hotfix_pick::repo::GitCli;
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Duration;

/// Options for the create command
#[derive(Debug, Clone, Default)]
pub struct HotfixOptions {
    /// Release branch to base the hotfix on
    pub release_branch: String,
    /// Name of the hotfix branch
    pub hotfix_name: String,
    /// Raw PR list, e.g. `#42,#164`
    pub change_requests: String,
    /// Main branch override
    pub main_branch: Option<String>,
    /// Remote override
    pub remote: Option<String>,
    /// Report the plan without touching the repository
    pub dry_run: bool,
    /// Preview plan and prompt for confirmation before executing
    pub confirm: bool,
    /// Open the hotfix PR as a draft
    pub draft: bool,
    /// Push and open a PR after replay
    pub push: bool,
}

/// Run the create command
#[allow(clippy::future_not_send)]
pub async fn run_hotfix(path: &Path, options: HotfixOptions) -> Result<()> {
    // Reject a malformed PR list before any network access
    let numbers = parse_change_request_numbers(&options.change_requests)?;

    // Phase 1: GATHER

    let ctx = CommandContext::new(path, options.remote.as_deref()).await?;
    let config = HotfixConfig {
        platform: ctx.platform.config().clone(),
        remote: ctx.remote_name.clone(),
        main_branch: resolve_main_branch(options.main_branch.clone(), &ctx.settings),
        release_branch: options.release_branch.clone(),
        hotfix_name: options.hotfix_name.clone(),
        change_requests: numbers,
        draft: options.draft || ctx.settings.draft.unwrap_or(false),
        push: options.push,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!(
        "Fetching {} PR(s) from {}/{}...",
        config.change_requests.len(),
        config.platform.owner,
        config.platform.repo
    ));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let gather_progress = SpinnerProgress(spinner.clone());
    let gathered =
        gather_change_requests(ctx.platform.as_ref(), &config.change_requests, &gather_progress)
            .await;
    let gathered = match gathered {
        Ok(gathered) => gathered,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };

    spinner.set_message(format!(
        "Listing commits on {}...",
        config.main_branch.emphasis()
    ));
    let mainline = gather_mainline(ctx.platform.as_ref(), &config.main_branch, &gathered).await;
    let mainline = match mainline {
        Ok(mainline) => mainline,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };
    spinner.finish_with_message(format!(
        "{} Fetched {} PR(s) and {} commit(s) on {}",
        check(),
        gathered.len(),
        mainline.len(),
        config.main_branch.emphasis()
    ));

    // Phase 2: PLAN

    let plan = create_hotfix_plan(gathered, &mainline)?;

    // Phase 3: EXECUTE

    if options.dry_run {
        report_plan(&plan, &config);
        println!("{}", "Run without --dry-run to execute.".muted());
        return Ok(());
    }

    if options.confirm {
        report_plan(&plan, &config);
        if !Confirm::new()
            .with_prompt("Proceed with hotfix?")
            .default(true)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
        println!();
    }

    println!(
        "{} {}",
        "Replaying".emphasis(),
        format!("{} commit(s)...", plan.commit_count()).accent()
    );

    let replayer = GitCli::new(&ctx.repo_root);
    let progress = CliProgress::compact();
    let outcome = execute_replay(&plan, &replayer, &config.replay_options(), &progress).await?;

    if !outcome.pushed {
        println!();
        println!(
            "{} Hotfix branch {} built locally with {} commit(s)",
            check(),
            config.hotfix_name.accent(),
            outcome.replayed.len()
        );
        return Ok(());
    }

    let body = render_summary_table(&plan);
    let pr = ctx
        .platform
        .create_pr_with_options(
            &config.hotfix_name,
            &config.release_branch,
            &hotfix_pr_title(&config.hotfix_name),
            Some(&body),
            config.draft,
        )
        .await?;

    println!();
    println!(
        "{} Opened PR #{} {} into {}",
        check(),
        pr.number,
        pr.head_ref.emphasis(),
        pr.base_ref.accent()
    );
    println!("   {}", hyperlink(&pr.html_url, &pr.html_url));

    Ok(())
}

/// Routes gather warnings around the running spinner
struct SpinnerProgress(ProgressBar);

#[async_trait]
impl ProgressCallback for SpinnerProgress {
    async fn on_message(&self, message: &str) {
        self.0.set_message(message.to_string());
    }

    async fn on_warning(&self, message: &str) {
        self.0
            .suspend(|| println!("{}", format!("⚠ {message}").warn()));
    }
}

/// Report what would be replayed
fn report_plan(plan: &HotfixPlan, config: &HotfixConfig) {
    println!();
    println!(
        "{}: {} from {}",
        "Hotfix plan".emphasis(),
        config.hotfix_name.accent(),
        config.release_branch.accent()
    );
    println!();

    for planned in &plan.change_requests {
        let merged = planned
            .change_request
            .merged_at
            .map_or_else(|| "unknown".to_string(), |at| at.to_rfc3339());
        println!(
            "  PR #{}: {} {}",
            planned.change_request.number,
            planned.change_request.title,
            format!("(merged {merged})").muted()
        );
    }
    println!();

    for step in replay_steps(plan) {
        println!(
            "  {} {} {}",
            short_sha(step.mainline_id()).accent(),
            step.commit_match.mainline_commit.summary(),
            format!("#{}", step.change_request.number).muted()
        );
    }

    for ambiguity in &plan.ambiguities {
        println!(
            "  {}",
            format!(
                "⚠ {} also matches fingerprint {}, using {}",
                short_sha(&ambiguity.ignored_commit_id),
                ambiguity.fingerprint,
                short_sha(&ambiguity.bound_commit_id)
            )
            .warn()
        );
    }
    println!();
}
