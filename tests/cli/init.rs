//! Tests for `envsync init`.

use crate::support::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_init_writes_config() {
    let t = Test::new();

    let output = t.init("prj_abc");
    assert_success(&output);
    assert_stdout_contains(&output, "initialized");

    let config = fs::read_to_string(t.dir.path().join("envsync.toml")).unwrap();
    assert!(config.contains("prj_abc"));
    assert!(config.contains("strategy = \"fixed\""));
}

#[test]
fn test_init_with_team() {
    let t = Test::new();

    t.cmd()
        .args(["init", "--project", "prj_abc", "--team", "team_1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prj_abc/team_1"));
}

#[test]
fn test_init_twice_fails() {
    let t = Test::new();
    assert_success(&t.init("prj_abc"));

    let output = t.init("prj_abc");
    assert_failure(&output);
    assert_stderr_contains(&output, "already initialized");
}

#[test]
fn test_init_respects_config_flag() {
    let t = Test::new();

    t.cmd()
        .args(["--config", "deploy/envsync.toml", "init", "--project", "p"])
        .assert()
        .failure();

    fs::create_dir(t.dir.path().join("deploy")).unwrap();
    t.cmd()
        .args(["--config", "deploy/envsync.toml", "init", "--project", "p"])
        .assert()
        .success();
    assert!(t.dir.path().join("deploy/envsync.toml").exists());
}

#[test]
fn test_completions() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("envsync"));
}
