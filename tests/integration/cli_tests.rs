//! Integration tests for the jj-policy-hook binary

#![allow(deprecated)]

use std::fs;

use assert_cmd::Command;
use jj_policy_hook::rules::RULES;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with an isolated home, no audit log and no env switches
fn hook(dir: &TempDir) -> Command {
    let config = dir.path().join("config.toml");
    fs::write(&config, "[general]\naudit_log = false\n").unwrap();

    let mut cmd = Command::cargo_bin("jj-policy-hook").unwrap();
    cmd.env("HOME", dir.path())
        .env_remove("JJ_POLICY_DISABLED")
        .env_remove("JJ_POLICY_WARN_ONLY")
        .arg("--config")
        .arg(&config);
    cmd
}

// ---------------------------------------------------------------------------
// hook mode
// ---------------------------------------------------------------------------

#[test]
fn test_malformed_input_allows() {
    let dir = TempDir::new().unwrap();
    hook(&dir)
        .write_stdin("this is not json {")
        .assert()
        .success()
        .stdout("{}\n");
}

#[test]
fn test_empty_input_allows() {
    let dir = TempDir::new().unwrap();
    hook(&dir).write_stdin("").assert().success().stdout("{}\n");
    hook(&dir).write_stdin("  \n").assert().success().stdout("{}\n");
}

#[test]
fn test_denied_record() {
    let dir = TempDir::new().unwrap();
    hook(&dir)
        .write_stdin(r#"{"tool_name":"Bash","tool_input":{"command":"git commit -m x"}}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""permissionDecision":"deny""#))
        .stdout(predicate::str::contains("git-disallowed"));
}

#[test]
fn test_allowed_record() {
    let dir = TempDir::new().unwrap();
    hook(&dir)
        .write_stdin(r#"{"tool_name":"Bash","tool_input":{"command":"jj describe -m hello"}}"#)
        .assert()
        .success()
        .stdout("{}\n");
}

#[test]
fn test_dry_run_does_not_deny() {
    let dir = TempDir::new().unwrap();
    hook(&dir)
        .arg("--dry-run")
        .write_stdin(r#"{"tool_name":"Bash","tool_input":{"command":"jj diffedit"}}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("permissionDecision").not())
        .stdout(predicate::str::contains("jj-diffedit"));
}

// ---------------------------------------------------------------------------
// --check
// ---------------------------------------------------------------------------

#[test]
fn test_check_denied_exits_two() {
    let dir = TempDir::new().unwrap();
    hook(&dir)
        .args(["--check", "jj describe"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("[jj-describe-no-message]"))
        .stderr(predicate::str::contains("jj describe -m"));
}

#[test]
fn test_check_allowed_exits_zero() {
    let dir = TempDir::new().unwrap();
    hook(&dir).args(["--check", "ls"]).assert().code(0);
    hook(&dir).arg("--check=jj resolve --list").assert().code(0);
}

// ---------------------------------------------------------------------------
// --list-rules
// ---------------------------------------------------------------------------

#[test]
fn test_list_rules_in_order() {
    let dir = TempDir::new().unwrap();
    let output = hook(&dir).arg("--list-rules").assert().success().get_output().clone();
    let stdout = String::from_utf8(output.stdout).unwrap();

    let ids: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    let expected: Vec<&str> = RULES.iter().map(|r| r.id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_list_rules_honours_disabled_rules() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(
        &config,
        "[general]\naudit_log = false\n\n[policy]\ndisabled_rules = [\"jj-diffedit\"]\n",
    )
    .unwrap();

    hook(&dir)
        .arg("--config")
        .arg(&config)
        .arg("--list-rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("git-disallowed"))
        .stdout(predicate::str::contains("jj-diffedit").not());
}
