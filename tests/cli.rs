//! CLI-level tests for the scythe binary.
//!
//! These exercise argument handling only; nothing here talks to
//! GitHub.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_the_cleanup_options() {
    Command::cargo_bin("scythe")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--owner"))
        .stdout(predicate::str::contains("--repo"))
        .stdout(predicate::str::contains("--hours"))
        .stdout(predicate::str::contains("--minutes"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn version_is_reported() {
    Command::cargo_bin("scythe")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("scythe"));
}

#[test]
fn positional_arguments_show_help_instead_of_running() {
    Command::cargo_bin("scythe")
        .unwrap()
        .args(["--owner", "someone", "--repo", "sandbox", "stray"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn owner_and_repo_are_required() {
    Command::cargo_bin("scythe")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--owner"))
        .stderr(predicate::str::contains("--repo"));
}

#[test]
fn repo_alone_is_not_enough() {
    Command::cargo_bin("scythe")
        .unwrap()
        .args(["--repo", "sandbox"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--owner"));
}
