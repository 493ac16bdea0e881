//! Error types.
//!
//! Every fallible operation returns [`Result`]. Errors are grouped by the
//! layer that raises them and wrapped in the top-level [`Error`].

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("not initialized: {0} not found")]
    NotInitialized(String),

    #[error("already initialized: {0} exists")]
    AlreadyInitialized(String),

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("variable {key}: environment variable {var} is not set")]
    MissingEnvValue { key: String, var: String },

    #[error("invalid settle strategy: {0} (expected fixed, poll or none)")]
    InvalidSettleStrategy(String),

    #[error("unable to determine home directory")]
    NoHomeDir,
}

/// A declared entry violates an invariant. Raised before any remote call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("variable key cannot be empty")]
    EmptyKey,

    #[error("invalid variable key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("variable {0}: at least one of target or custom_environment_ids must be set")]
    EmptyScope(String),

    #[error("variable {key}: comment is {len} characters (max {max})")]
    CommentTooLong { key: String, len: usize, max: usize },

    #[error("unknown target '{0}' (expected production, preview or development)")]
    UnknownTarget(String),

    #[error("variable {0}: no value declared")]
    MissingValue(String),

    #[error(
        "variables {}: this team forces all environment variables to be sensitive; \
         remove `sensitive` or set it to true",
        .0.join(", ")
    )]
    SensitivePolicy(Vec<String>),
}

/// Failures reported by a remote control plane.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The addressed entry or subject does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("remote request failed: {0}")]
    Request(String),

    #[error("remote io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("remote returned malformed data: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl RemoteError {
    /// Whether this error means the target is already absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Local persistence failures (fingerprints, recorded state).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("state file {path} belongs to subject {found}, expected {expected}")]
    SubjectMismatch {
        path: String,
        found: String,
        expected: String,
    },

    #[error("fingerprint store lock poisoned")]
    Poisoned,
}

/// A reconciliation cycle failed. Nothing after the failing call was issued.
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("could not list environment variables: {0}")]
    ListFailed(#[source] RemoteError),

    #[error("could not remove environment variable {key} ({remote_id}): {source}")]
    DeleteFailed {
        key: String,
        remote_id: String,
        #[source]
        source: RemoteError,
    },

    #[error("could not create environment variables {}: {source}", keys.join(", "))]
    CreateFailed {
        keys: Vec<String>,
        #[source]
        source: RemoteError,
    },

    #[error("subject {0} not found; check project and team ids")]
    SubjectNotFound(String),

    #[error("removed entries still visible after {attempts} consistency checks")]
    NotSettled { attempts: u32 },

    #[error("reconciliation cancelled before {0}")]
    Cancelled(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
