//! Tests for `envsync apply` and `envsync refresh`.

use crate::support::*;

#[test]
fn test_apply_records_state_without_values() {
    let t = Test::with_config(BASIC_CONFIG);

    let output = t.apply();
    assert_success(&output);
    assert_stdout_contains(&output, "applied 2 changes");

    let state = t.state();
    assert_eq!(state["subject"], "prj_test");
    assert!(state["entries"]["API_KEY"]["remote_id"].is_string());
    assert!(state["entries"]["DATABASE_URL"]["remote_id"].is_string());

    let raw = state.to_string();
    assert!(!raw.contains("sk-test-12345"));
    assert!(!raw.contains("postgres://localhost/app"));
}

#[test]
fn test_fingerprints_live_under_home() {
    let t = Test::with_config(BASIC_CONFIG);
    assert_success(&t.apply());

    let stored = t
        .home
        .path()
        .join(".envsync/fingerprints")
        .join(format!("{}.json", subject().file_stem()));
    let raw = std::fs::read_to_string(stored).unwrap();
    assert!(raw.contains("API_KEY"));
    assert!(!raw.contains("sk-test-12345"));
}

#[test]
fn test_second_apply_keeps_identifiers() {
    let t = Test::with_config(BASIC_CONFIG);
    assert_success(&t.apply());
    let before = t.state()["entries"]["API_KEY"]["remote_id"].clone();

    let output = t.apply();
    assert_success(&output);
    assert_stdout_contains(&output, "no changes");
    assert_eq!(t.state()["entries"]["API_KEY"]["remote_id"], before);
}

#[test]
fn test_changed_config_converges() {
    let t = Test::with_config(BASIC_CONFIG);
    assert_success(&t.apply());
    let before = t.state()["entries"]["API_KEY"]["remote_id"].clone();

    t.write_config(CHANGED_CONFIG);
    assert_success(&t.apply());

    let state = t.state();
    assert!(state["entries"].get("DATABASE_URL").is_none());
    assert_ne!(state["entries"]["API_KEY"]["remote_id"], before);
    assert_stdout_contains(&t.plan(), "no changes");
}

#[test]
fn test_apply_without_yes_is_refused_off_terminal() {
    let t = Test::with_config(BASIC_CONFIG);

    let output = t.cmd().arg("apply").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "cancelled");
    assert!(!t.dir.path().join(".envsync/state.json").exists());
}

#[test]
fn test_refresh_drops_vanished_variables() {
    let t = Test::with_config(BASIC_CONFIG);
    assert_success(&t.apply());
    std::fs::remove_file(t.dir.path().join(".envsync/remote.json")).unwrap();

    assert_success(&t.refresh());
    assert!(t.state()["entries"].as_object().unwrap().is_empty());

    let output = t.plan();
    assert_stdout_contains(&output, "+ API_KEY");
}
