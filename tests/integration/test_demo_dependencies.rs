use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::TempDir;

use sitekit::models::dependency::DependencyKind;
use sitekit::services::demo_analyzer::{extract_deps, extract_deps_with, ImportAnalyzer, ImportGraph};
use sitekit::Result;

fn write(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

/// bower_components/ with t-button depending on polymer and iron-icons
fn components_tree(root: &Path) -> PathBuf {
    let components = root.join("bower_components");
    let element = components.join("t-button");

    write(
        &element.join("bower.json"),
        r#"{
  "name": "t-button",
  "dependencies": {
    "polymer": "Polymer/polymer#^1.2.0",
    "webcomponentsjs": "webcomponents/webcomponentsjs#^0.7.0"
  }
}"#,
    );
    write(
        &element.join("t-button.html"),
        r#"<link rel="import" href="../polymer/polymer.html">
<link rel="import" href="../iron-icons/iron-icons.html">
<script src="t-button.js"></script>
<dom-module id="t-button"></dom-module>"#,
    );
    write(&element.join("t-button.js"), "Polymer({is: 't-button'});");
    write(
        &element.join("demo/index.html"),
        r#"<!doctype html>
<html>
<head>
  <script src="../../webcomponentsjs/webcomponents-lite.js"></script>
  <script src="https://cdn.example.com/analytics.js"></script>
  <link rel="import" href="../t-button.html">
</head>
<body><t-button></t-button></body>
</html>"#,
    );
    write(&components.join("polymer/polymer.html"), "<script>Polymer = {};</script>");
    write(&components.join("webcomponentsjs/webcomponents-lite.js"), "");

    element
}

#[tokio::test]
async fn test_demo_dependencies_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let element = components_tree(temp_dir.path());

    let deps = extract_deps(
        &element.join("bower.json"),
        &element.join("demo/index.html"),
        "org/t-button#1.0.0",
    )
    .await
    .unwrap();

    let summary: Vec<(DependencyKind, &str, Option<&str>)> = deps
        .iter()
        .map(|d| (d.kind, d.relative_path.as_str(), d.install_endpoint.as_deref()))
        .collect();

    assert_eq!(
        summary,
        vec![
            (DependencyKind::Script, "t-button/t-button.js", Some("org/t-button#1.0.0")),
            (
                DependencyKind::Script,
                "webcomponentsjs/webcomponents-lite.js",
                Some("webcomponents/webcomponentsjs#^0.7.0")
            ),
            (DependencyKind::Link, "iron-icons/iron-icons.html", None),
            (DependencyKind::Link, "polymer/polymer.html", Some("Polymer/polymer#^1.2.0")),
            (DependencyKind::Link, "t-button/t-button.html", Some("org/t-button#1.0.0")),
        ]
    );
}

#[tokio::test]
async fn test_missing_demo_page_fails() {
    let temp_dir = TempDir::new().unwrap();
    let element = components_tree(temp_dir.path());

    let result = extract_deps(
        &element.join("bower.json"),
        &element.join("demo/missing.html"),
        "org/t-button",
    )
    .await;

    assert!(result.is_err());
}

/// Reports a fixed graph regardless of the entry file
struct FixedAnalyzer(ImportGraph);

#[async_trait]
impl ImportAnalyzer for FixedAnalyzer {
    async fn analyze(&self, _entry: &Path) -> Result<ImportGraph> {
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn test_only_the_demo_page_itself_is_excluded() {
    let temp_dir = TempDir::new().unwrap();
    let element = components_tree(temp_dir.path());
    let demo = element.join("demo/index.html");

    // Another package's index.html shares the demo's file name
    let analyzer = FixedAnalyzer(ImportGraph {
        documents: BTreeSet::from([
            demo.clone(),
            temp_dir.path().join("bower_components/polymer/index.html"),
        ]),
        scripts: BTreeSet::new(),
    });

    let deps = extract_deps_with(&analyzer, &element.join("bower.json"), &demo, "org/t-button")
        .await
        .unwrap();

    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].relative_path, "polymer/index.html");
    assert_eq!(deps[0].kind, DependencyKind::Link);
}
