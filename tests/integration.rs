// Integration tests for the gemminer CLI surface.
//
// These tests use assert_cmd to invoke the binary and verify
// exit codes and argument handling.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to build a Command for the gemminer binary.
fn gemminer() -> Command {
    Command::cargo_bin("gemminer").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    gemminer()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gemminer"));
}

#[test]
fn cli_help_flag() {
    gemminer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hidden gem repository"));
}

#[test]
fn mine_requires_snapshot() {
    gemminer()
        .arg("mine")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn validate_requires_path() {
    gemminer()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn verbose_and_quiet_conflict() {
    gemminer()
        .args(["-v", "-q", "plan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn plan_rejects_bad_reference_time() {
    gemminer()
        .args(["plan", "--now", "last tuesday"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid timestamp"));
}
