//! Tests for `envsync destroy`.

use crate::support::*;

#[test]
fn test_destroy_empties_remote_and_state() {
    let t = Test::with_config(BASIC_CONFIG);
    assert_success(&t.apply());

    let output = t.destroy();
    assert_success(&output);
    assert_stdout_contains(&output, "destroyed 2 variables");

    assert!(t.state()["entries"].as_object().unwrap().is_empty());
    let remote = t.remote();
    assert!(remote["subjects"]["prj_test"]["entries"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[test]
fn test_destroy_with_nothing_recorded() {
    let t = Test::with_config(BASIC_CONFIG);

    let output = t.destroy();
    assert_success(&output);
    assert_stdout_contains(&output, "nothing recorded");
}

#[test]
fn test_destroy_without_yes_is_refused_off_terminal() {
    let t = Test::with_config(BASIC_CONFIG);
    assert_success(&t.apply());

    let output = t.cmd().arg("destroy").output().unwrap();
    assert_failure(&output);
    assert_eq!(t.state()["entries"].as_object().unwrap().len(), 2);
}
