//! Stale test-branch cleanup.
//!
//! When an automated test run fails, it can leave a branch (and an open
//! pull request) behind on the sandbox repository. This module decides
//! which of those branches have outlived their usefulness and removes
//! them; GitHub closes any associated pull request on its own once the
//! branch ref is gone.
//!
//! Only branches carrying the automation naming prefix are ever
//! considered. Human branches are never deleted, no matter how old.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Prefix that marks a branch as created by an automated test run.
pub const TEST_BRANCH_PREFIX: &str = "test-";

/// Default expiry window when neither hours nor minutes are given.
pub const DEFAULT_EXPIRY_HOURS: i64 = 48;

/// Options controlling a cleanup run.
///
/// The age threshold may be given in hours or minutes; hours take
/// priority when both are present. With neither, branches expire after
/// [`DEFAULT_EXPIRY_HOURS`] so routine noise from yesterday's runs is
/// never touched.
#[derive(Debug, Clone, Default)]
pub struct DeletionOptions {
    /// Report the would-be deletions without issuing any delete call.
    pub dry_run: bool,
    /// Age threshold in hours. Takes priority over `minutes`.
    pub hours: Option<i64>,
    /// Age threshold in minutes. Ignored when `hours` is set.
    pub minutes: Option<i64>,
}

/// A branch selected for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleBranch {
    /// The branch name.
    pub name: String,
    /// When the branch tip was last committed to.
    pub updated_at: DateTime<Utc>,
    /// Open pull request whose head is this branch, if any. GitHub
    /// closes it automatically when the branch is deleted.
    pub pull: Option<u64>,
}

/// An individual branch that could not be deleted.
#[derive(Debug, Clone)]
pub struct DeletionFailure {
    /// The branch that failed to delete.
    pub branch: String,
    /// Why the deletion failed.
    pub reason: String,
}

/// Outcome of one cleanup run.
///
/// Partial success is the normal shape of a run: branches that fail to
/// delete end up in `failures` while the rest of the run proceeds.
#[derive(Debug)]
pub struct ReapReport {
    /// The instant branches had to be older than to qualify.
    pub cutoff: DateTime<Utc>,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Every branch that qualified for deletion.
    pub candidates: Vec<StaleBranch>,
    /// Branches actually deleted (empty on a dry run).
    pub deleted: Vec<String>,
    /// Per-branch deletion failures.
    pub failures: Vec<DeletionFailure>,
}

/// Capabilities the cleanup needs from a repository host.
///
/// [`GitHubSession`](crate::GitHubSession) implements this against the
/// live API; tests drive the policy with an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait BranchHost {
    /// Lists every branch name in the repository.
    async fn list_branches(&self) -> Result<Vec<String>>;

    /// Returns the last-commit timestamp of a branch.
    async fn branch_updated_at(&self, branch: &str) -> Result<DateTime<Utc>>;

    /// Lists the open pull requests as (number, head branch) pairs.
    async fn open_pulls(&self) -> Result<Vec<PullSummary>>;

    /// Deletes a branch ref. Deleting an already-deleted ref is benign.
    async fn delete_branch(&self, branch: &str) -> Result<()>;
}

/// An open pull request, reduced to what the cleanup needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullSummary {
    /// Pull request number.
    pub number: u64,
    /// Name of the head branch.
    pub head_ref: String,
}

/// Computes the staleness cutoff for the given options.
///
/// All three threshold paths use the same rolling-window semantics:
/// the cutoff is `now` minus the threshold, with no calendar-day
/// anchoring.
#[must_use]
pub fn cutoff_for(options: &DeletionOptions, now: DateTime<Utc>) -> DateTime<Utc> {
    if let Some(hours) = options.hours {
        now - Duration::hours(hours)
    } else if let Some(minutes) = options.minutes {
        now - Duration::minutes(minutes)
    } else {
        now - Duration::hours(DEFAULT_EXPIRY_HOURS)
    }
}

/// Returns whether a branch was created by an automated test run.
#[must_use]
pub fn is_test_branch(name: &str) -> bool {
    name.starts_with(TEST_BRANCH_PREFIX)
}

/// Deletes (or, on a dry run, reports) every stale test branch.
///
/// A branch qualifies when its name matches the automation naming
/// convention and its last-commit timestamp is strictly older than the
/// cutoff; a branch updated exactly at the cutoff is not yet stale.
///
/// # Errors
///
/// Branch enumeration failures abort the run. Individual deletion
/// failures do not: they are collected in the report so one bad branch
/// cannot block cleanup of the rest.
///
/// # Examples
///
/// ```no_run
/// use scythe_github::{DeletionOptions, GitHubSession, delete_stale_branches};
///
/// # async fn example() -> scythe_github::Result<()> {
/// let mut session = GitHubSession::new("owner", "sandbox");
/// session.authenticate("owner").await?;
///
/// let options = DeletionOptions {
///     dry_run: true,
///     ..Default::default()
/// };
/// let report = delete_stale_branches(&session, &options).await?;
/// println!("{} stale branches", report.candidates.len());
/// # Ok(())
/// # }
/// ```
pub async fn delete_stale_branches(
    host: &impl BranchHost,
    options: &DeletionOptions,
) -> Result<ReapReport> {
    reap_at(host, options, Utc::now()).await
}

async fn reap_at(
    host: &impl BranchHost,
    options: &DeletionOptions,
    now: DateTime<Utc>,
) -> Result<ReapReport> {
    let cutoff = cutoff_for(options, now);
    let mut report = ReapReport {
        cutoff,
        dry_run: options.dry_run,
        candidates: Vec::new(),
        deleted: Vec::new(),
        failures: Vec::new(),
    };

    // A cutoff in the future means an empty window; nothing qualifies.
    if cutoff > now {
        debug!(%cutoff, %now, "cutoff lies in the future, nothing to do");
        return Ok(report);
    }

    let mut candidates = Vec::new();
    for name in host.list_branches().await? {
        if !is_test_branch(&name) {
            continue;
        }

        let updated_at = match host.branch_updated_at(&name).await {
            Ok(timestamp) => timestamp,
            Err(e) => {
                // Never delete a branch whose age is unknown.
                warn!(branch = %name, error = %e, "could not determine branch age, skipping");
                continue;
            }
        };

        if updated_at < cutoff {
            candidates.push(StaleBranch {
                name,
                updated_at,
                pull: None,
            });
        } else {
            debug!(branch = %name, %updated_at, "branch is not stale yet");
        }
    }

    if !candidates.is_empty() {
        match host.open_pulls().await {
            Ok(pulls) => {
                for candidate in &mut candidates {
                    candidate.pull = pulls
                        .iter()
                        .find(|pull| pull.head_ref == candidate.name)
                        .map(|pull| pull.number);
                }
            }
            Err(e) => warn!(error = %e, "could not list open pull requests"),
        }
    }

    for candidate in &candidates {
        if options.dry_run {
            info!(branch = %candidate.name, "dry run, would delete");
            continue;
        }

        match host.delete_branch(&candidate.name).await {
            Ok(()) => report.deleted.push(candidate.name.clone()),
            Err(e) => {
                warn!(branch = %candidate.name, error = %e, "failed to delete branch");
                report.failures.push(DeletionFailure {
                    branch: candidate.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    report.candidates = candidates;
    Ok(report)
}
