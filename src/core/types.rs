//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// An environment variable name (e.g., DATABASE_URL, API_KEY).
///
/// Unique within one subject's entry set.
pub type EnvKey = String;

/// Opaque identifier assigned by the remote control plane.
///
/// Not stable across out-of-band deletion and recreation.
pub type RemoteId = String;

/// Identifier of a custom deployment environment.
pub type CustomEnvironmentId = String;
