//! CLI surface tests

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn adbundle_cmd() -> Command {
    let mut cmd = Command::cargo_bin("adbundle").unwrap();
    cmd.env_remove("ADBUNDLE_CONFIG");
    cmd.env_remove("ADBUNDLE_DATA_DIR");
    cmd
}

#[test]
fn test_help_lists_commands() {
    adbundle_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("package"))
        .stdout(predicate::str::contains("edit"));
}

#[test]
fn test_version_flag() {
    adbundle_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("adbundle"));
}

#[test]
fn test_version_command() {
    adbundle_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Build info:"));
}

#[test]
fn test_completions_bash() {
    adbundle_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("adbundle"));
}

#[test]
fn test_completions_unknown_shell() {
    adbundle_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell: tcsh"));
}

#[test]
fn test_edit_help_shows_examples() {
    adbundle_cmd()
        .args(["edit", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--parent-delay"))
        .stdout(predicate::str::contains("EXAMPLES"));
}

#[test]
fn test_unknown_command_fails() {
    adbundle_cmd().arg("install").assert().failure();
}

#[test]
fn test_explicit_config_must_exist() {
    let workspace = common::TestWorkspace::with_converter_output("{}");
    workspace
        .cmd()
        .args(["--config", "missing.yaml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.yaml"));
}

#[test]
fn test_invalid_config_is_reported() {
    let workspace = common::TestWorkspace::with_converter_output("{}");
    workspace.write_file("adbundle.yaml", b"bind: [not, a, string]\nunknown_key: 1\n");
    workspace
        .cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_partial_identity_is_rejected() {
    let workspace = common::TestWorkspace::with_converter_output("{}");
    workspace
        .cmd()
        .env("FIREBASE_ADMIN_PROJECT_ID", "demo-project")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FIREBASE_ADMIN_CLIENT_EMAIL"));
}
