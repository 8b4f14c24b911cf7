//! Error types for GitHub session and branch-cleanup operations.

/// Errors that can occur while talking to GitHub.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error occurred while calling the GitHub API.
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// Credential resolution failed.
    ///
    /// Covers revoked or malformed credentials and failures while
    /// exchanging them for an API session. Not retried internally.
    #[error("authentication failed: {reason}")]
    Auth {
        /// A description of why authentication failed.
        reason: String,
    },

    /// No credential source yielded a token.
    #[error("no GitHub credentials available (provide a token or log in with `gh auth login`)")]
    NoCredentials,

    /// An API operation was attempted before [`authenticate`] was called.
    ///
    /// This is a programming error in the caller, surfaced eagerly
    /// instead of producing a confusing unauthenticated API failure.
    ///
    /// [`authenticate`]: crate::GitHubSession::authenticate
    #[error("session is not authenticated; call authenticate() first")]
    NotAuthenticated,

    /// Failed to invoke the `gh` CLI while looking up a token.
    #[error("failed to get GitHub token from gh CLI: {0}")]
    TokenLookup(#[source] std::io::Error),

    /// A ref deletion was rejected by GitHub.
    #[error("could not delete branch {branch}: HTTP status {status}")]
    RefDelete {
        /// The branch whose ref could not be deleted.
        branch: String,
        /// The HTTP status GitHub answered with.
        status: u16,
    },

    /// A branch listing did not include a usable last-commit timestamp.
    #[error("branch {branch} has no last-commit timestamp")]
    MissingTimestamp {
        /// The branch in question.
        branch: String,
    },
}

/// A specialized Result type for GitHub operations.
pub type Result<T> = std::result::Result<T, Error>;
