//! Test assertion helpers.

use std::process::Output;

/// Assert that a command output was successful.
pub fn assert_success(output: &Output) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("Command failed:\n{}", stderr);
    }
}

/// Assert that a command output failed.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "Expected command to fail but it succeeded"
    );
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Assert stdout contains a string.
pub fn assert_stdout_contains(output: &Output, expected: &str) {
    let out = stdout(output);
    assert!(
        out.contains(expected),
        "stdout missing '{}', got: {}",
        expected,
        out
    );
}

/// Assert stderr contains a string.
pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let err = stderr(output);
    assert!(
        err.contains(expected),
        "stderr missing '{}', got: {}",
        expected,
        err
    );
}

/// Assert a plan contains exactly these created, removed and unchanged keys.
pub fn assert_partitions(
    plan: &envsync::core::domain::OperationPlan,
    to_add: &[&str],
    to_remove: &[&str],
    unchanged: &[&str],
) {
    assert_eq!(plan.to_add.keys().collect::<Vec<_>>(), to_add, "to_add");
    assert_eq!(plan.to_remove.keys().collect::<Vec<_>>(), to_remove, "to_remove");
    assert_eq!(plan.unchanged.keys().collect::<Vec<_>>(), unchanged, "unchanged");
}
