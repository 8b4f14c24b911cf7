//! Authenticated GitHub session bound to a single repository.
//!
//! A [`GitHubSession`] owns credential acquisition and exposes the
//! underlying [`Octocrab`] client once authenticated. Operations issued
//! before [`authenticate`](GitHubSession::authenticate) fail fast with
//! [`Error::NotAuthenticated`].

use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::reap::{BranchHost, PullSummary};

/// Characters escaped in branch-name path segments. `/` stays raw so
/// nested branch names keep working in ref routes.
const BRANCH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%');

/// Page size used when enumerating branches.
const BRANCH_PAGE_SIZE: usize = 100;

/// An authenticated handle to one GitHub repository.
///
/// # Security
///
/// Tokens are stored using [`SecretString`] to prevent accidental
/// logging or exposure in debug output.
///
/// # Examples
///
/// ```no_run
/// use scythe_github::GitHubSession;
///
/// # async fn example() -> scythe_github::Result<()> {
/// let mut session = GitHubSession::new("owner", "sandbox");
/// session.authenticate("owner").await?;
///
/// // The raw client is available for operations not wrapped here.
/// let client = session.client()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GitHubSession {
    owner: String,
    repo: String,
    token: Option<SecretString>,
    client: Option<Octocrab>,
}

impl GitHubSession {
    /// Creates a session for `owner/repo` that resolves credentials at
    /// authentication time.
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            token: None,
            client: None,
        }
    }

    /// Creates a session with an explicit token, bypassing credential
    /// resolution.
    #[must_use]
    pub fn with_token(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: SecretString,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            token: Some(token),
            client: None,
        }
    }

    /// The repository owner this session is bound to.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name this session is bound to.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns whether [`authenticate`](Self::authenticate) has
    /// completed successfully.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.client.is_some()
    }

    /// Resolves credentials for `owner` and builds the API client.
    ///
    /// Credential sources, in order:
    ///
    /// 1. An explicit token given via [`with_token`](Self::with_token)
    /// 2. The `GITHUB_TOKEN` environment variable
    /// 3. `gh auth token` (GitHub CLI)
    ///
    /// Safe to call more than once; later calls reuse the existing
    /// client. Transient failures (rate limiting, network errors) are
    /// not retried here and propagate to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCredentials`] if no source yields a token,
    /// or an API error if the client cannot be built.
    #[instrument(skip(self))]
    pub async fn authenticate(&mut self, owner: &str) -> Result<&Octocrab> {
        if self.client.is_none() {
            let token = self.resolve_token().await?;
            debug!(owner, repo = %self.repo, "building authenticated GitHub client");
            let client = Octocrab::builder()
                .personal_token(token.expose_secret())
                .build()
                .map_err(Error::Api)?;
            self.client = Some(client);
        }

        self.client.as_ref().ok_or(Error::NotAuthenticated)
    }

    /// Returns the authenticated client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if
    /// [`authenticate`](Self::authenticate) has not been called yet.
    pub fn client(&self) -> Result<&Octocrab> {
        self.client.as_ref().ok_or(Error::NotAuthenticated)
    }

    async fn resolve_token(&self) -> Result<SecretString> {
        if let Some(token) = &self.token {
            return Ok(token.clone());
        }

        if let Ok(token) = std::env::var("GITHUB_TOKEN")
            && !token.is_empty()
        {
            debug!("using token from GITHUB_TOKEN");
            return Ok(SecretString::from(token));
        }

        match gh_auth_token().await? {
            Some(token) => Ok(SecretString::from(token)),
            None => Err(Error::NoCredentials),
        }
    }

    fn route(&self, tail: &str) -> String {
        format!("/repos/{}/{}/{}", self.owner, self.repo, tail)
    }
}

/// Gets a token from the `gh` CLI.
///
/// Returns `Ok(None)` when `gh` is not installed or not logged in;
/// those are not errors, just an empty rung of the resolution chain.
async fn gh_auth_token() -> Result<Option<String>> {
    use tokio::process::Command;

    let output = match Command::new("gh").args(["auth", "token"]).output().await {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(None);
        }
        Err(e) => {
            return Err(Error::TokenLookup(e));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if stderr.contains("not logged in") || stderr.contains("no oauth token") {
            return Ok(None);
        }
        return Err(Error::Auth {
            reason: format!("gh auth token failed: {}", stderr.trim()),
        });
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Ok(None);
    }

    Ok(Some(token))
}

// Wire shapes for the routes not wrapped by octocrab's typed API.

#[derive(Debug, Deserialize)]
struct BranchSummary {
    name: String,
}

#[derive(Debug, Deserialize)]
struct BranchDetail {
    commit: BranchCommit,
}

#[derive(Debug, Deserialize)]
struct BranchCommit {
    commit: CommitInfo,
}

#[derive(Debug, Deserialize)]
struct CommitInfo {
    #[serde(default)]
    committer: Option<CommitSignature>,
    #[serde(default)]
    author: Option<CommitSignature>,
}

#[derive(Debug, Deserialize)]
struct CommitSignature {
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct PullDetail {
    number: u64,
    head: PullHead,
}

#[derive(Debug, Deserialize)]
struct PullHead {
    #[serde(rename = "ref")]
    ref_name: String,
}

impl BranchHost for GitHubSession {
    #[instrument(skip(self), fields(owner = %self.owner, repo = %self.repo))]
    async fn list_branches(&self) -> Result<Vec<String>> {
        let client = self.client()?;
        let mut names = Vec::new();
        let mut page = 1u32;

        loop {
            let route = self.route(&format!(
                "branches?per_page={BRANCH_PAGE_SIZE}&page={page}"
            ));
            let batch: Vec<BranchSummary> = client.get(route, None::<&()>).await?;
            let last_page = batch.len() < BRANCH_PAGE_SIZE;
            names.extend(batch.into_iter().map(|branch| branch.name));
            if last_page {
                break;
            }
            page += 1;
        }

        debug!(count = names.len(), "listed branches");
        Ok(names)
    }

    async fn branch_updated_at(&self, branch: &str) -> Result<DateTime<Utc>> {
        let client = self.client()?;
        let segment = utf8_percent_encode(branch, BRANCH_SEGMENT);
        let route = self.route(&format!("branches/{segment}"));
        let detail: BranchDetail = client.get(route, None::<&()>).await?;

        let commit = detail.commit.commit;
        commit
            .committer
            .and_then(|signature| signature.date)
            .or_else(|| commit.author.and_then(|signature| signature.date))
            .ok_or_else(|| Error::MissingTimestamp {
                branch: branch.to_string(),
            })
    }

    #[instrument(skip(self), fields(owner = %self.owner, repo = %self.repo))]
    async fn open_pulls(&self) -> Result<Vec<PullSummary>> {
        let client = self.client()?;
        let route = self.route("pulls?state=open&per_page=100");
        let pulls: Vec<PullDetail> = client.get(route, None::<&()>).await?;

        Ok(pulls
            .into_iter()
            .map(|pull| PullSummary {
                number: pull.number,
                head_ref: pull.head.ref_name,
            })
            .collect())
    }

    async fn delete_branch(&self, branch: &str) -> Result<()> {
        let client = self.client()?;
        let segment = utf8_percent_encode(branch, BRANCH_SEGMENT);
        let route = self.route(&format!("git/refs/heads/{segment}"));

        let response = client._delete(route, None::<&()>).await?;
        let status = response.status();

        // A ref that is already gone counts as deleted.
        if status.as_u16() == 404 {
            debug!(branch, "ref already deleted");
            return Ok(());
        }
        if !status.is_success() {
            warn!(branch, status = status.as_u16(), "ref deletion rejected");
            return Err(Error::RefDelete {
                branch: branch.to_string(),
                status: status.as_u16(),
            });
        }

        debug!(branch, "deleted ref");
        Ok(())
    }
}
