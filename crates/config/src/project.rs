//! The typed project configuration model.
//!
//! [`ProjectConfig`] is the shape every configuration source must
//! resolve to. Field names on the wire use the camel-case spelling the
//! rest of the tool suite already reads and writes (`baseOwner`,
//! `appID`, `maxCommitsIgnore`, ...), so existing config files keep
//! working unchanged.

use serde::{Deserialize, Serialize};

/// The complete configuration for one monitored project.
///
/// A value of this type is either fully present and structurally valid
/// or was never produced at all; the loader never hands out a partial
/// configuration. Deep semantic validation (e.g. whether an owner
/// actually exists on the host) is deliberately left to the consumer.
///
/// # Examples
///
/// ```
/// use scythe_config::ProjectConfig;
///
/// let json = r#"{
///     "repo": {
///         "name": "git", "owner": "tracker", "baseOwner": "upstream",
///         "owners": ["upstream", "tracker"], "branches": ["main"],
///         "closingBranches": ["main"], "trackingBranches": ["next"],
///         "host": "github.com"
///     },
///     "mailrepo": {
///         "name": "mail", "owner": "archive", "branch": "master",
///         "host": "github.com", "url": "https://github.com/archive/mail",
///         "descriptiveName": "mail archive"
///     },
///     "mail": { "author": "bot@example.com", "sender": "bot@example.com" },
///     "app": { "appID": 12345, "installationID": 67890,
///              "name": "scythe-app", "displayName": "Scythe" },
///     "lint": { "maxCommits": 30 },
///     "user": { "allowUserAsLogin": false }
/// }"#;
///
/// let config: ProjectConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.repo.base_owner, "upstream");
/// assert_eq!(config.app.app_id, 12345);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// The repository being monitored.
    pub repo: RepoConfig,

    /// The repository holding the mail archive.
    pub mailrepo: MailRepoConfig,

    /// Mail identity used when sending patches.
    pub mail: MailConfig,

    /// Per-project mail routing, when the project accepts patches by mail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectInfo>,

    /// The GitHub App identity the tool suite operates as.
    pub app: AppConfig,

    /// Lint thresholds applied to incoming pull requests.
    pub lint: LintConfig,

    /// User display policy.
    pub user: UserConfig,
}

/// Identity of the monitored repository and the branch topology around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoConfig {
    /// Name of the repository.
    pub name: String,

    /// Owner of the repository holding the tracking notes.
    pub owner: String,

    /// Owner of the base repository.
    pub base_owner: String,

    /// Owners of the clones being polled for pull requests.
    pub owners: Vec<String>,

    /// Remote branches to fetch.
    pub branches: Vec<String>,

    /// A pull request landing on one of these branches is closed.
    pub closing_branches: Vec<String>,

    /// A pull request landing on one of these branches gets a comment.
    pub tracking_branches: Vec<String>,

    /// Branch of the maintainer manually applying changes, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainer_branch: Option<String>,

    /// Host the repository lives on.
    pub host: String,
}

/// Identity of the mail-archive repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailRepoConfig {
    pub name: String,
    pub owner: String,
    pub branch: String,
    pub host: String,
    pub url: String,
    /// Human-readable label for the archive.
    pub descriptive_name: String,
}

/// Author and sender addresses used on outgoing mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailConfig {
    pub author: String,
    pub sender: String,
}

/// Mail routing for projects that take patch submissions by mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    /// Address patches are sent to.
    pub to: String,

    /// Upstream branch a pull request must be based on.
    pub branch: String,

    /// Addresses always copied on patches.
    pub cc: Vec<String>,

    /// URL prefix of the list archive a patch ends up in.
    pub url_prefix: String,
}

/// The GitHub App identity (credentials live elsewhere; this is the
/// numeric identity plus display names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Numeric GitHub App ID.
    #[serde(rename = "appID")]
    pub app_id: u64,

    /// Numeric installation ID of the app on the tracked repository.
    #[serde(rename = "installationID")]
    pub installation_id: u64,

    /// Internal app name.
    pub name: String,

    /// Name used in comments to identify the app.
    #[serde(rename = "displayName")]
    pub display_name: String,

    /// Alternate app name, where one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altname: Option<String>,
}

/// Lint thresholds for incoming pull requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintConfig {
    /// Pull request URLs exempted from the commit-count check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_commits_ignore: Option<Vec<String>>,

    /// Maximum number of commits allowed in a pull request.
    pub max_commits: u32,
}

/// How user identities are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Use the GitHub login as the name when the real name is private.
    pub allow_user_as_login: bool,
}

/// A fully-populated configuration used by tests across the crate.
#[cfg(test)]
pub(crate) fn sample_config() -> ProjectConfig {
    ProjectConfig {
        repo: RepoConfig {
            name: "git".to_string(),
            owner: "tracker".to_string(),
            base_owner: "upstream".to_string(),
            owners: vec!["upstream".to_string(), "tracker".to_string()],
            branches: vec!["main".to_string(), "next".to_string()],
            closing_branches: vec!["main".to_string()],
            tracking_branches: vec!["next".to_string()],
            maintainer_branch: Some("maint".to_string()),
            host: "github.com".to_string(),
        },
        mailrepo: MailRepoConfig {
            name: "mail".to_string(),
            owner: "archive".to_string(),
            branch: "master".to_string(),
            host: "github.com".to_string(),
            url: "https://github.com/archive/mail".to_string(),
            descriptive_name: "mail archive".to_string(),
        },
        mail: MailConfig {
            author: "bot@example.com".to_string(),
            sender: "bot@example.com".to_string(),
        },
        project: Some(ProjectInfo {
            to: "list@example.com".to_string(),
            branch: "master".to_string(),
            cc: vec!["maintainer@example.com".to_string()],
            url_prefix: "https://lore.example.com/".to_string(),
        }),
        app: AppConfig {
            app_id: 12345,
            installation_id: 67890,
            name: "scythe-app".to_string(),
            display_name: "Scythe".to_string(),
            altname: None,
        },
        lint: LintConfig {
            max_commits_ignore: Some(vec![
                "https://github.com/upstream/git/pull/1".to_string(),
            ]),
            max_commits: 30,
        },
        user: UserConfig {
            allow_user_as_login: false,
        },
    }
}
