//! Integration tests for the `bbc` binary

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

/// A `bbc` command whose configuration lives in `home`.
fn bbc(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin!("bbc"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("APPDATA", home.path())
        .env_remove("BBC_CONSUMER_KEY")
        .env_remove("BBC_CONSUMER_SECRET")
        .env_remove("BBC_NAMESPACE")
        .env_remove("BBC_REPO");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    bbc(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("restriction"))
        .stdout(predicate::str::contains("variable"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    bbc(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_completion_bash() {
    let home = TempDir::new().unwrap();
    bbc(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_bbc"));
}

#[test]
fn test_config_set_then_get() {
    let home = TempDir::new().unwrap();
    bbc(&home)
        .args(["config", "set", "defaults.namespace", "myteam"])
        .assert()
        .success();
    bbc(&home)
        .args(["config", "get", "defaults.namespace"])
        .assert()
        .success()
        .stdout("myteam\n");
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    bbc(&home)
        .args(["config", "set", "core.editor", "vim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_repo_view_without_consumer() {
    let home = TempDir::new().unwrap();
    bbc(&home)
        .args(["repo", "view", "-R", "team/app"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No OAuth consumer configured"));
}
