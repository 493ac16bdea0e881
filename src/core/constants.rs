//! Constants used throughout envsync.
//!
//! Centralizes magic strings and configuration values.

/// Configuration file name (envsync.toml).
pub const CONFIG_FILE: &str = "envsync.toml";

/// Recorded state file, relative to the configuration directory.
pub const STATE_FILE: &str = ".envsync/state.json";

/// File-backed control plane, relative to the configuration directory.
pub const REMOTE_FILE: &str = ".envsync/remote.json";

/// Fingerprint storage directory relative to HOME (~/.envsync/fingerprints).
pub const FINGERPRINT_DIR: &str = ".envsync/fingerprints";

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "ENVSYNC_LOG";

/// Longest comment accepted on a variable, in characters.
pub const MAX_COMMENT_LEN: usize = 1000;

/// Settling delay between removals and re-creations, in seconds.
pub const DEFAULT_SETTLE_SECS: u64 = 5;

/// Interval between consistency probes, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Consistency probes before giving up.
pub const DEFAULT_POLL_ATTEMPTS: u32 = 20;
