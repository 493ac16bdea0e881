//! Test support utilities for envsync integration tests.
//!
//! Provides isolated CLI environments and in-memory cycle fixtures.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own temporary project dir and home dir. Child
/// processes use `.current_dir()` so tests can run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary home directory (fingerprints land here)
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with `envsync.toml` written from `toml`.
    pub fn with_config(toml: &str) -> Self {
        let t = Self::new();
        t.write_config(toml);
        t
    }

    /// Replace `envsync.toml`.
    pub fn write_config(&self, toml: &str) {
        fs::write(self.dir.path().join("envsync.toml"), toml).expect("failed to write config");
    }

    /// Recorded state as JSON.
    pub fn state(&self) -> serde_json::Value {
        let raw = fs::read_to_string(self.dir.path().join(".envsync/state.json"))
            .expect("state file should exist");
        serde_json::from_str(&raw).expect("state file should be JSON")
    }

    /// The file-backed control plane document as JSON.
    pub fn remote(&self) -> serde_json::Value {
        let raw = fs::read_to_string(self.dir.path().join(".envsync/remote.json"))
            .expect("remote file should exist");
        serde_json::from_str(&raw).expect("remote file should be JSON")
    }
}
