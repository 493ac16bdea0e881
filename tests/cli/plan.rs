//! Tests for `envsync plan` and `envsync status`.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_plan_lists_creations() {
    let t = Test::with_config(BASIC_CONFIG);

    let output = t.plan();
    assert_success(&output);
    assert_stdout_contains(&output, "+ API_KEY");
    assert_stdout_contains(&output, "+ DATABASE_URL");
    assert_stdout_contains(&output, "2 to create");
}

#[test]
fn test_plan_changes_nothing() {
    let t = Test::with_config(BASIC_CONFIG);

    assert_success(&t.plan());
    assert!(!t.dir.path().join(".envsync/state.json").exists());
    assert!(!t.dir.path().join(".envsync/remote.json").exists());
}

#[test]
fn test_plan_after_apply_is_clean() {
    let t = Test::with_config(BASIC_CONFIG);
    assert_success(&t.apply());

    t.cmd()
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("no changes"));
}

#[test]
fn test_plan_shows_replacement_and_removal() {
    let t = Test::with_config(BASIC_CONFIG);
    assert_success(&t.apply());
    t.write_config(CHANGED_CONFIG);

    let output = t.plan();
    assert_success(&output);
    assert_stdout_contains(&output, "~ API_KEY");
    assert_stdout_contains(&output, "value changed");
    assert_stdout_contains(&output, "- DATABASE_URL");
}

#[test]
fn test_status_counts() {
    let t = Test::with_config(BASIC_CONFIG);

    let output = t.status();
    assert_success(&output);
    assert_stdout_contains(&output, "prj_test");
    assert_stdout_contains(&output, "never");

    assert_success(&t.apply());
    let output = t.status();
    assert_success(&output);
    assert_stdout_contains(&output, "UTC");
}
