//! GitHub session and stale test-branch cleanup for scythe.
//!
//! Automated test runs against the sandbox repository leave branches
//! (and open pull requests) behind when they fail. This crate provides
//! the pieces that clean those up:
//!
//! - [`GitHubSession`]: an authenticated handle bound to one
//!   owner/repository pair, owning credential resolution
//! - [`delete_stale_branches`] and [`DeletionOptions`]: the age-based
//!   deletion policy, with dry-run support
//! - [`BranchHost`]: the capability seam between the policy and the
//!   API, so the policy is testable without a network
//! - [`Error`]: error types for session and cleanup operations
//!
//! # Authentication
//!
//! Credentials are resolved once per session: an explicit token, the
//! `GITHUB_TOKEN` environment variable, or the `gh` CLI. Tokens are
//! held in [`secrecy::SecretString`] so they never leak into debug
//! output. Failures are not retried internally.
//!
//! # Cleanup semantics
//!
//! Only branches named with the automation prefix
//! ([`TEST_BRANCH_PREFIX`]) are considered; a human branch is never
//! deleted. A branch qualifies when its last commit is strictly older
//! than the cutoff (48 hours by default, overridable in hours or
//! minutes). Deleting a branch makes GitHub close any pull request
//! whose head it was, so no separate PR handling is needed.
//!
//! ```no_run
//! use scythe_github::{DeletionOptions, GitHubSession, delete_stale_branches};
//!
//! # async fn example() -> scythe_github::Result<()> {
//! let mut session = GitHubSession::new("owner", "sandbox");
//! session.authenticate("owner").await?;
//!
//! let report = delete_stale_branches(&session, &DeletionOptions::default()).await?;
//! for branch in &report.deleted {
//!     println!("deleted {branch}");
//! }
//! for failure in &report.failures {
//!     eprintln!("could not delete {}: {}", failure.branch, failure.reason);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod reap;
pub mod session;

pub use error::{Error, Result};
pub use reap::{
    BranchHost, DEFAULT_EXPIRY_HOURS, DeletionFailure, DeletionOptions, PullSummary, ReapReport,
    StaleBranch, TEST_BRANCH_PREFIX, cutoff_for, delete_stale_branches, is_test_branch,
};
pub use session::GitHubSession;
