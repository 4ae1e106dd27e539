// Contract tests for `sitekit manifest` and `sitekit deps`

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

const MANIFEST: &str = r#"{
  "name": "t-card",
  "dependencies": {
    "polymer": "Polymer/polymer#^1.2.0",
    "iron-icons": "PolymerElements/iron-icons"
  },
  "devDependencies": {
    "polymer": "Polymer/polymer#^1.4.0"
  }
}"#;

#[test]
fn test_manifest_json() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("bower.json"), MANIFEST).unwrap();

    let output = Command::cargo_bin("sitekit")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["manifest", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let deps: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        deps,
        json!({
            "iron-icons": "PolymerElements/iron-icons",
            "polymer": "Polymer/polymer#^1.4.0"
        })
    );
}

#[test]
fn test_manifest_without_file() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("sitekit")
        .unwrap()
        .current_dir(temp_dir.path())
        .arg("manifest")
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependencies declared"));
}

#[test]
fn test_manifest_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("bower.json"), "{ not json").unwrap();

    Command::cargo_bin("sitekit")
        .unwrap()
        .current_dir(temp_dir.path())
        .arg("manifest")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("bower.json"));
}

#[test]
fn test_deps_json() {
    let temp_dir = TempDir::new().unwrap();
    let element = temp_dir.path().join("bower_components/t-card");
    fs::create_dir_all(element.join("demo")).unwrap();
    fs::write(element.join("bower.json"), MANIFEST).unwrap();
    fs::write(
        element.join("demo/index.html"),
        r#"<link rel="import" href="../../polymer/polymer.html"><script src="../t-card.js"></script>"#,
    )
    .unwrap();

    let output = Command::cargo_bin("sitekit")
        .unwrap()
        .current_dir(&element)
        .args(["deps", "demo/index.html", "--install", "org/t-card", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let deps: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        deps,
        json!([
            {"relPath": "t-card/t-card.js", "install": "org/t-card", "type": "script"},
            {"relPath": "polymer/polymer.html", "install": "Polymer/polymer#^1.4.0", "type": "link"}
        ])
    );
}
