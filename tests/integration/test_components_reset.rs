use std::fs;
use std::path::Path;
use std::sync::Mutex;

use tempfile::TempDir;

use sitekit::services::components_reset::{
    remove_bower_components, reset_components_dir, Removal, PRESERVED_COMPONENT_FILES,
};

fn write(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

#[tokio::test]
async fn test_preserved_files_survive_reset() {
    let temp_dir = TempDir::new().unwrap();
    let components = temp_dir.path().join("bower_components");
    write(&components.join("webcomponentsjs/webcomponents-lite.js"), "// polyfill");
    write(&components.join("webcomponentsjs/webcomponents.js"), "// full polyfill");
    write(&components.join("polymer/polymer.html"), "<link>");

    let outcome = reset_components_dir(
        &components,
        &["webcomponentsjs/webcomponents-lite.js"],
        &|_: &str| {},
    )
    .await
    .unwrap();

    assert!(outcome.was_removed());
    assert_eq!(
        fs::read_to_string(components.join("webcomponentsjs/webcomponents-lite.js")).unwrap(),
        "// polyfill"
    );
    assert!(!components.join("webcomponentsjs/webcomponents.js").exists());
    assert!(!components.join("polymer").exists());
    assert_eq!(outcome.restored.len(), 1);
    assert!(outcome.missing.is_empty());
}

#[tokio::test]
async fn test_missing_preserved_files_are_reported() {
    let temp_dir = TempDir::new().unwrap();
    let components = temp_dir.path().join("bower_components");
    write(&components.join("polymer/polymer.html"), "<link>");

    let outcome = reset_components_dir(&components, &["particles.js/particles.js"], &|_: &str| {})
        .await
        .unwrap();

    assert!(outcome.was_removed());
    assert!(!components.exists());
    assert!(outcome.restored.is_empty());
    assert_eq!(outcome.missing, vec![components.join("particles.js/particles.js")]);
}

#[tokio::test]
async fn test_same_basename_in_different_packages() {
    let temp_dir = TempDir::new().unwrap();
    let components = temp_dir.path().join("bower_components");
    write(&components.join("a/index.js"), "a");
    write(&components.join("b/index.js"), "b");

    reset_components_dir(&components, &["a/index.js", "b/index.js"], &|_: &str| {})
        .await
        .unwrap();

    assert_eq!(fs::read_to_string(components.join("a/index.js")).unwrap(), "a");
    assert_eq!(fs::read_to_string(components.join("b/index.js")).unwrap(), "b");
}

#[tokio::test]
async fn test_site_without_components_logs_failure() {
    let temp_dir = TempDir::new().unwrap();
    let messages = Mutex::new(Vec::new());
    let logger = |message: &str| messages.lock().unwrap().push(message.to_string());

    let outcome = remove_bower_components(temp_dir.path(), &logger).await.unwrap();

    assert!(matches!(outcome.removal, Removal::Skipped { .. }));
    assert_eq!(outcome.missing.len(), PRESERVED_COMPONENT_FILES.len());
    assert_eq!(messages.lock().unwrap().len(), 1);

    let leftovers: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
    assert!(leftovers.is_empty(), "staging directory should be cleaned up");
}
