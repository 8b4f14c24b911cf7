//! Integration tests for the scythe-config crate.

use std::fs;
use tempfile::TempDir;

use scythe_config::{
    AppConfig, ConfigError, ConfigStore, LintConfig, MailConfig, MailRepoConfig, ProjectConfig,
    ProjectInfo, RepoConfig, UserConfig, load_config, save_config,
};

fn full_config() -> ProjectConfig {
    ProjectConfig {
        repo: RepoConfig {
            name: "git".to_string(),
            owner: "tracker".to_string(),
            base_owner: "upstream".to_string(),
            owners: vec!["upstream".to_string(), "tracker".to_string()],
            branches: vec!["main".to_string()],
            closing_branches: vec!["main".to_string()],
            tracking_branches: vec!["next".to_string()],
            maintainer_branch: None,
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
            cc: vec![],
            url_prefix: "https://lore.example.com/".to_string(),
        }),
        app: AppConfig {
            app_id: 111,
            installation_id: 222,
            name: "scythe-app".to_string(),
            display_name: "Scythe".to_string(),
            altname: Some("scythe-alt".to_string()),
        },
        lint: LintConfig {
            max_commits_ignore: None,
            max_commits: 30,
        },
        user: UserConfig {
            allow_user_as_login: true,
        },
    }
}

#[tokio::test]
async fn config_save_and_reload_is_deep_equal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("project-config.json");

    let original = full_config();
    save_config(&path, &original).unwrap();
    let loaded = load_config(&path).await.unwrap();

    assert_eq!(original, loaded);
}

#[tokio::test]
async fn config_load_from_json5_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("project-config.json5");

    fs::write(
        &path,
        r#"
        {
            // the repository under test
            repo: {
                name: "git",
                owner: "tracker",
                baseOwner: "upstream",
                owners: ["upstream"],
                branches: ["main"],
                closingBranches: ["main"],
                trackingBranches: ["next"],
                host: "github.com",
            },
            mailrepo: {
                name: "mail",
                owner: "archive",
                branch: "master",
                host: "github.com",
                url: "https://github.com/archive/mail",
                descriptiveName: "mail archive",
            },
            mail: { author: "bot@example.com", sender: "bot@example.com" },
            app: { appID: 111, installationID: 222, name: "scythe-app", displayName: "Scythe" },
            lint: { maxCommits: 30 },
            user: { allowUserAsLogin: true },
        }
        "#,
    )
    .unwrap();

    let config = load_config(&path).await.unwrap();
    assert_eq!(config.repo.base_owner, "upstream");
    assert_eq!(config.app.app_id, 111);
    assert_eq!(config.app.installation_id, 222);
    assert!(config.project.is_none());
}

#[tokio::test]
async fn config_load_null_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("project-config.json");
    fs::write(&path, "null").unwrap();

    let result = load_config(&path).await;
    assert!(matches!(result, Err(ConfigError::EmptySource { .. })));
}

#[test]
fn store_lifecycle() {
    let store = ConfigStore::new();
    assert!(matches!(store.get(), Err(ConfigError::NotSet)));

    let first = full_config();
    store.set(first.clone());
    assert_eq!(store.get().unwrap(), first);

    let mut second = full_config();
    second.repo.name = "replacement".to_string();
    store.set(second.clone());
    assert_eq!(store.get().unwrap(), second);
}

#[cfg(unix)]
#[tokio::test]
async fn config_load_from_program_source() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let config = full_config();

    let payload = dir.path().join("payload.json");
    fs::write(&payload, serde_json::to_string(&config).unwrap()).unwrap();

    let script = dir.path().join("project-config");
    fs::write(&script, format!("#!/bin/sh\ncat {}\n", payload.display())).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let loaded = load_config(&script).await.unwrap();
    assert_eq!(loaded, config);
}
