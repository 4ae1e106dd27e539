// Contract tests for `sitekit fetch`

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_fetch_bad_repo_exits_with_usage_code() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("sitekit")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["fetch", "not-a-slug", ".", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Bad repo: not-a-slug"));
}

#[test]
fn test_fetch_unreachable_host_exits_with_network_code() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("sitekit")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["fetch", "owner/widget", ".", "widget", "--host", "http://127.0.0.1:9"])
        .assert()
        .code(3);
}

#[test]
fn test_fetch_rejects_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("sitekit.toml"), "archive_host = 42\n").unwrap();

    Command::cargo_bin("sitekit")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["fetch", "owner/widget", ".", "widget"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("archive_host has to be string"));
}
