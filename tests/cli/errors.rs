//! Error reporting and hints.

use crate::support::*;

#[test]
fn test_missing_config_suggests_init() {
    let t = Test::new();

    let output = t.plan();
    assert_failure(&output);
    assert_stderr_contains(&output, "not initialized");
    assert_stderr_contains(&output, "envsync init");
}

#[test]
fn test_invalid_key_is_reported() {
    let t = Test::with_config(
        r#"
[project]
id = "prj_test"

[variables.BAD-KEY]
value = "x"
target = ["production"]
"#,
    );

    let output = t.plan();
    assert_failure(&output);
    assert_stderr_contains(&output, "BAD-KEY");
}

#[test]
fn test_unknown_target_is_reported() {
    let t = Test::with_config(
        r#"
[project]
id = "prj_test"

[variables.A]
value = "x"
target = ["staging"]
"#,
    );

    let output = t.plan();
    assert_failure(&output);
    assert_stderr_contains(&output, "unknown target 'staging'");
}

#[test]
fn test_unset_from_env_is_reported() {
    let t = Test::with_config(
        r#"
[project]
id = "prj_test"

[variables.A]
from_env = "ENVSYNC_TEST_SURELY_UNSET"
target = ["production"]
"#,
    );

    let output = t
        .cmd()
        .env_remove("ENVSYNC_TEST_SURELY_UNSET")
        .arg("plan")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "ENVSYNC_TEST_SURELY_UNSET");
}

#[test]
fn test_from_env_value_is_used() {
    let t = Test::with_config(
        r#"
[project]
id = "prj_test"

[settle]
strategy = "none"

[variables.A]
from_env = "ENVSYNC_TEST_VALUE"
target = ["production"]
"#,
    );

    let output = t
        .cmd()
        .env("ENVSYNC_TEST_VALUE", "from-shell")
        .args(["apply", "--yes"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.remote().to_string().contains("from-shell"));
}

#[test]
fn test_invalid_settle_strategy_is_reported() {
    let t = Test::with_config(
        r#"
[project]
id = "prj_test"

[settle]
strategy = "eventually"
"#,
    );

    let output = t.plan();
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid settle strategy");
}

#[test]
fn test_malformed_config_is_reported() {
    let t = Test::with_config("[project\nid = ");

    let output = t.status();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config");
}

#[test]
fn test_state_from_other_project_is_rejected() {
    let t = Test::with_config(BASIC_CONFIG);
    assert_success(&t.apply());
    t.write_config(&BASIC_CONFIG.replace("prj_test", "prj_other"));

    let output = t.plan();
    assert_failure(&output);
    assert_stderr_contains(&output, "belongs to subject prj_test");
}
