//! Integration tests for the cribcheck CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Test helper to get the CLI binary
fn cribcheck_cmd() -> Command {
    Command::cargo_bin("cribcheck").unwrap()
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn create_course(root: &Path) {
    write(&root.join("alice/A.java"), "class A {}");
    write(&root.join("bob/B.java"), "class B {}");
    write(&root.join("base/T.java"), "class T {}");
}

#[test]
fn test_cli_help() {
    cribcheck_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("discover"))
        .stdout(predicate::str::contains("report"));
}

#[test]
fn test_cli_version() {
    cribcheck_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_list_languages() {
    cribcheck_cmd()
        .arg("list-languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("java"))
        .stdout(predicate::str::contains(".py"));
}

#[test]
fn test_print_default_config_is_yaml() {
    cribcheck_cmd()
        .arg("print-default-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("maximum_comparisons: 100"))
        .stdout(predicate::str::contains("language: java"));
}

#[test]
fn test_discover_json_output() {
    let dir = tempdir().unwrap();
    create_course(&dir.path().join("subs"));

    // "base" only exists inside the root, so it resolves as a root entry
    let output = cribcheck_cmd()
        .current_dir(dir.path())
        .args(["discover", "subs", "--format", "json", "--basecode", "base"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = summary["submissions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alice", "bob"]);
    assert_eq!(summary["basecode"]["name"], "base");
    assert!(summary["diagnostics"]
        .as_array()
        .unwrap()
        .iter()
        .any(|d| d["kind"] == "deprecation"));
}

#[test]
fn test_discover_reports_missing_root() {
    let dir = tempdir().unwrap();
    cribcheck_cmd()
        .arg("discover")
        .arg(dir.path().join("nowhere"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_discover_rejects_dotted_basecode_name() {
    let dir = tempdir().unwrap();
    create_course(dir.path());
    cribcheck_cmd()
        .current_dir(dir.path())
        .args(["discover", ".", "--basecode", "my.base"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot contain dots"));
}

#[test]
fn test_discover_uses_implicit_config_file() {
    let dir = tempdir().unwrap();
    create_course(dir.path());
    write(&dir.path().join("alice/notes.txt"), "notes");
    write(
        &dir.path().join(".cribcheck.yml"),
        "root_directory: .\nexcluded_files: ['bob']\n",
    );

    let output = cribcheck_cmd()
        .current_dir(dir.path())
        .args(["discover", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let submissions = summary["submissions"].as_array().unwrap();
    assert!(submissions.iter().all(|s| s["name"] != "bob"));
    let alice = submissions.iter().find(|s| s["name"] == "alice").unwrap();
    assert_eq!(alice["files"].as_array().unwrap().len(), 1);
}

#[test]
fn test_report_command_writes_archive() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("subs");
    create_course(&root);
    let comparisons = dir.path().join("scores.json");
    write(
        &comparisons,
        r#"[{"first":"alice","second":"bob","similarity":0.8,"max_similarity":0.9}]"#,
    );

    cribcheck_cmd()
        .arg("report")
        .arg(&root)
        .arg("--comparisons")
        .arg(&comparisons)
        .arg("--out")
        .arg(dir.path().join("report"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Report archive"));

    assert!(dir.path().join("report.zip").is_file());
    assert!(!dir.path().join("report").exists());
}

#[test]
fn test_report_command_rejects_unknown_submission() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("subs");
    create_course(&root);
    let comparisons = dir.path().join("scores.json");
    write(
        &comparisons,
        r#"[{"first":"alice","second":"mallory","similarity":0.3}]"#,
    );

    cribcheck_cmd()
        .arg("report")
        .arg(&root)
        .arg("--comparisons")
        .arg(&comparisons)
        .arg("--out")
        .arg(dir.path().join("report"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("mallory"));
}
