//! scythe - cleans up stale automated test branches.
//!
//! When a test run fails, it can leave a branch and a pull request
//! active on the sandbox repository. Running this tool deletes the old
//! test branches, which causes GitHub to close the associated pull
//! requests. Branches older than two days are cleaned up by default;
//! the criteria can be overridden with `--hours` or `--minutes`,
//! primarily for testing.

use clap::{CommandFactory, Parser};
use scythe_github::{DeletionOptions, GitHubSession, delete_stale_branches};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "scythe",
    version,
    about = "Clean up stale automated test branches on a GitHub sandbox repository"
)]
struct Cli {
    /// Owner of the repository to clean up
    #[arg(short, long)]
    owner: String,

    /// Name of the repository to clean up
    #[arg(short, long)]
    repo: String,

    /// How many hours old a branch must be before it expires
    #[arg(long)]
    hours: Option<i64>,

    /// How many minutes old a branch must be before it expires
    /// (--hours has priority)
    #[arg(short, long)]
    minutes: Option<i64>,

    /// Report the branches that would be deleted without deleting them
    #[arg(long)]
    dry_run: bool,

    /// No positional arguments are accepted
    #[arg(hide = true)]
    rest: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if !cli.rest.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let options = DeletionOptions {
        dry_run: cli.dry_run,
        hours: cli.hours,
        minutes: cli.minutes,
    };

    let mut session = GitHubSession::new(&cli.owner, &cli.repo);
    session.authenticate(&cli.owner).await?;

    let report = delete_stale_branches(&session, &options).await?;

    if report.candidates.is_empty() {
        println!(
            "no stale test branches in {}/{} (cutoff {})",
            cli.owner, cli.repo, report.cutoff
        );
        return Ok(());
    }

    for branch in &report.candidates {
        let pull = branch
            .pull
            .map(|number| format!(", closes PR #{number}"))
            .unwrap_or_default();
        if report.dry_run {
            println!(
                "would delete {} (last updated {}{pull})",
                branch.name, branch.updated_at
            );
        } else {
            println!(
                "stale: {} (last updated {}{pull})",
                branch.name, branch.updated_at
            );
        }
    }

    for deleted in &report.deleted {
        println!("deleted {deleted}");
    }

    // Per-branch failures are reported without failing the run.
    for failure in &report.failures {
        eprintln!("could not delete {}: {}", failure.branch, failure.reason);
    }

    Ok(())
}
