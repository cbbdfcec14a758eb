//! hotfix - build hotfix branches from merged pull requests

mod cli;

use anstream::eprintln;
use clap::{Parser, Subcommand, ValueEnum};
use cli::style::Stylize;
use cli::{AuthPlatform, HotfixOptions};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(
    name = "hotfix",
    version,
    about = "Build hotfix branches from merged pull requests"
)]
struct Cli {
    /// Path to the repository (defaults to the current directory)
    #[arg(long, global = true)]
    path: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cherry-pick the commits of merged PRs onto a new hotfix branch
    Create {
        /// Release branch to add the hotfix to
        #[arg(short = 'r', long = "release", alias = "rb")]
        release: String,

        /// Name of the hotfix branch
        #[arg(short = 'n', long = "name", alias = "hf")]
        name: String,

        /// Comma-separated list of PRs, e.g. '#42,#164'
        #[arg(short = 'p', long = "prs")]
        prs: String,

        /// Main branch to cherry-pick from [default: master]
        #[arg(short = 'm', long = "main", alias = "mb")]
        main: Option<String>,

        /// Remote to fetch from and push to [default: origin]
        #[arg(long)]
        remote: Option<String>,

        /// Show the matched commits without touching the repository
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,

        /// Open the hotfix PR as a draft
        #[arg(long)]
        draft: bool,

        /// Build the branch locally without pushing or opening a PR
        #[arg(long)]
        no_push: bool,
    },

    /// Check authentication for a platform
    Auth {
        /// Platform to check
        #[arg(value_enum)]
        platform: AuthPlatformArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AuthPlatformArg {
    /// GitHub or GitHub Enterprise
    Github,
    /// GitLab or self-hosted GitLab
    Gitlab,
}

impl From<AuthPlatformArg> for AuthPlatform {
    fn from(arg: AuthPlatformArg) -> Self {
        match arg {
            AuthPlatformArg::Github => Self::GitHub,
            AuthPlatformArg::Gitlab => Self::GitLab,
        }
    }
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    // Tracing is opt-in via RUST_LOG or --verbose
    let filter = if verbose {
        EnvFilter::new("hotfix_pick=debug,hotfix=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("{}", format!("failed to initialize logging: {e}").muted());
    }

    let path = cli.path.unwrap_or_else(|| PathBuf::from("."));

    let result = match cli.command {
        Commands::Create {
            release,
            name,
            prs,
            main,
            remote,
            dry_run,
            yes,
            draft,
            no_push,
        } => {
            let options = HotfixOptions {
                release_branch: release,
                hotfix_name: name,
                change_requests: prs,
                main_branch: main,
                remote,
                dry_run,
                confirm: !yes,
                draft,
                push: !no_push,
            };
            cli::run_hotfix(&path, options).await
        }
        Commands::Auth { platform } => cli::run_auth(&path, platform.into()).await,
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "Error:".error());
        std::process::exit(e.exit_code());
    }
}
