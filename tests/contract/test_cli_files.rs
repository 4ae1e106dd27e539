// Contract tests for `sitekit copy`, `sitekit merge` and `sitekit reset`

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, rel).unwrap();
}

#[test]
fn test_copy_json_lists_destinations() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "src/demo/index.html");
    touch(temp_dir.path(), "src/demo/notes.md");

    let output = Command::cargo_bin("sitekit")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["copy", "src", "_site", "demo/*.html", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let response: Value = serde_json::from_slice(&output.stdout).unwrap();
    let copied = response["copied"].as_array().unwrap();
    assert_eq!(copied.len(), 1);
    assert!(copied[0].as_str().unwrap().ends_with("index.html"));
    assert!(temp_dir.path().join("_site/demo/index.html").is_file());
    assert!(!temp_dir.path().join("_site/demo/notes.md").exists());
}

#[test]
fn test_merge_prints_overrides() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "defaults/header.html");
    touch(temp_dir.path(), "defaults/footer.html");
    touch(temp_dir.path(), "custom/header.html");

    Command::cargo_bin("sitekit")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["merge", "--default", "defaults/*.html", "--override", "custom/*.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom/header.html"))
        .stdout(predicate::str::contains("defaults/footer.html"))
        .stdout(predicate::str::contains("defaults/header.html").not());
}

#[test]
fn test_reset_uses_configured_preserve_list() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "public/bower_components/keep/me.js");
    touch(temp_dir.path(), "public/bower_components/drop/me.js");
    fs::write(
        temp_dir.path().join("sitekit.toml"),
        "site_dir = \"public\"\npreserve = [\"keep/me.js\"]\n",
    )
    .unwrap();

    Command::cargo_bin("sitekit")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["reset", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"removed\": true"));

    assert!(temp_dir.path().join("public/bower_components/keep/me.js").is_file());
    assert!(!temp_dir.path().join("public/bower_components/drop").exists());
}
