#![allow(missing_docs)]

use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FIXTURE: &str = "### INPUT\n1 + 2\n### EXPECT\nADD\n  NUM 1.00\n  NUM 2.00\n";

fn testast() -> Command {
    Command::cargo_bin("testast").unwrap()
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn no_arguments_prints_usage_with_an_example() {
    testast()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Example .ast file:"))
        .stderr(predicate::str::contains("### EXPECT\nNUM 1.00"));
}

#[test]
fn show_prints_both_sections() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "add.ast", FIXTURE);
    testast()
        .arg("show")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("--- INPUT (6 bytes)\n1 + 2\n"))
        .stdout(predicate::str::contains("--- EXPECT (26 bytes)\n"));
}

#[test]
fn show_json_reports_every_fill() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "add.ast", FIXTURE);
    let output = testast()
        .args(["show", "--json", "--chunk", "4"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["input"], "1 + 2\n");
    assert_eq!(report["fills"].as_array().unwrap().len(), 2);
    assert_eq!(report["fills"][0]["outcome"], "Truncated");
    assert_eq!(report["fills"][1]["outcome"], "Found");
}

#[test]
fn lines_ends_with_eof() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "add.ast", FIXTURE);
    testast()
        .args(["lines", "--buffer", "8"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(" 7: [### INP]-\\n\n"))
        .stdout(predicate::str::ends_with("EOF\n"));
}

#[test]
fn check_passes_on_a_matching_dump() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "add.ast", FIXTURE);
    let actual = write(&dir, "add.out", "ADD\n  NUM 1.00\n  NUM 2.00\n");
    testast()
        .arg("check")
        .arg(&file)
        .arg(&actual)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ok: "));
}

#[test]
fn check_fails_with_the_first_differing_line() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "add.ast", FIXTURE);
    let actual = write(&dir, "add.out", "ADD\n  NUM 1.00\n  NUM 3.00\n");
    testast()
        .arg("check")
        .arg(&file)
        .arg(&actual)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "line 3: expected `  NUM 2.00`, got `  NUM 3.00`",
        ));
}

#[test]
fn missing_input_marker_is_an_error() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "bad.ast", "1\n### EXPECT\nNUM 1.00\n");
    testast()
        .arg("show")
        .arg(&file)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("fixture has no `### INPUT` line"));
}
