//! Command-line tests

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn calca() -> Command {
    Command::cargo_bin("calca").unwrap()
}

fn write_input(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("input.txt");
    fs::write(&path, contents).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════════════════
// Success
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_writes_annotated_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "x = 5\ny = x + 3\ny + 2 =>\n");
    let output = dir.path().join("output.txt");

    calca().arg(&input).arg(&output).assert().success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "x = 5\ny = x + 3\ny + 2 => 10\n"
    );
}

#[test]
fn test_cli_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    write_input(dir.path(), "2+3*4 =>\n");

    calca()
        .current_dir(dir.path())
        .args(["input.txt", "output.txt"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("output.txt")).unwrap(),
        "2+3*4 => 14\n"
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Failure Exit Codes
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_wrong_argument_count() {
    calca().assert().code(1);
    calca().arg("only-one.txt").assert().code(1);
    calca().args(["a", "b", "c"]).assert().code(1);
}

#[test]
fn test_cli_help_exits_zero() {
    calca()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("INPUT"));
}

#[test]
fn test_cli_missing_input() {
    let dir = tempfile::tempdir().unwrap();

    calca()
        .arg(dir.path().join("missing.txt"))
        .arg(dir.path().join("out.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.txt"));
}

#[test]
fn test_cli_self_reference() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "x = x + 1\nx =>\n");

    calca()
        .arg(&input)
        .arg(dir.path().join("out.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("refers to itself"));
}

#[test]
fn test_cli_unbound_symbol() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "z =>\n");

    calca()
        .arg(&input)
        .arg(dir.path().join("out.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("z is not defined"));
}

#[test]
fn test_cli_cycle_with_custom_depth() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "a = b\nb = a\na =>\n");

    calca()
        .arg(&input)
        .arg(dir.path().join("out.txt"))
        .args(["--max-depth", "8"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cycle detected"));
}

#[test]
fn test_cli_expansion_limit() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "a = 1\nb = a + a\nc = b + b\nc =>\n");

    calca()
        .arg(&input)
        .arg(dir.path().join("out.txt"))
        .args(["--max-tokens", "10"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("more than 10 tokens"));
}

#[test]
fn test_cli_keep_going_still_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "z =>\n1 + 1 =>\n");
    let output = dir.path().join("out.txt");

    calca()
        .arg(&input)
        .arg(&output)
        .arg("--keep-going")
        .assert()
        .code(1);

    assert_eq!(fs::read_to_string(&output).unwrap(), "z =>\n1 + 1 => 2\n");
}
