// Contract tests for `sitekit case` and `sitekit inner-html`

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_case_dash() {
    let mut cmd = Command::cargo_bin("sitekit").unwrap();
    cmd.args(["case", "--to", "dash", "Paper", "Button_Group"]);

    cmd.assert().success().stdout("paper-button-group\n");
}

#[test]
fn test_case_camel_and_title() {
    Command::cargo_bin("sitekit")
        .unwrap()
        .args(["case", "--to", "camel", "paper-icon-button"])
        .assert()
        .success()
        .stdout("paperIconButton\n");

    Command::cargo_bin("sitekit")
        .unwrap()
        .args(["case", "--to", "title", "paper-icon-button"])
        .assert()
        .success()
        .stdout("Paper Icon Button\n");
}

#[test]
fn test_case_rejects_unknown_style() {
    Command::cargo_bin("sitekit")
        .unwrap()
        .args(["case", "--to", "snake", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("snake"));
}

#[test]
fn test_inner_html() {
    let temp_dir = TempDir::new().unwrap();
    let page = temp_dir.path().join("t-button.html");
    fs::write(
        &page,
        "<div class=\"card\">\r\n  <button>\r\n    <span>Go</span>\r\n  </button>\r\n</div>\r\n",
    )
    .unwrap();

    Command::cargo_bin("sitekit")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["inner-html", "button", "t-button.html"])
        .assert()
        .success()
        .stdout("<span>Go</span>\n");
}

#[test]
fn test_inner_html_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("sitekit")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["inner-html", "template", "nope.html"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nope.html"));
}
