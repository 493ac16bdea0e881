//! Remote control plane.
//!
//! The authoritative source of live entries and the only component able to
//! create or delete them. Transport concerns (HTTP, retries) belong to the
//! implementation; the engine only sees this trait.

use crate::core::domain::{Entry, RemoteEntry, Subject};
use crate::error::RemoteError;

mod fs;
mod memory;

pub use fs::Filesystem;
pub use memory::{Call, Memory};

/// Result of a remote call.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// The live entry set of each subject.
pub trait Remote: Send + Sync {
    /// All live entries of a subject.
    ///
    /// The remote may report the same identifier more than once. Sensitive
    /// values come back with `decrypted = false` and no value.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::NotFound` if the subject does not exist.
    fn list(&self, subject: &Subject) -> RemoteResult<Vec<RemoteEntry>>;

    /// Create several entries in one call. All or nothing.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if any entry cannot be created; none are.
    fn create_batch(&self, subject: &Subject, entries: &[Entry]) -> RemoteResult<Vec<RemoteEntry>>;

    /// Delete one entry by identifier.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::NotFound` if the entry is already gone.
    fn delete(&self, subject: &Subject, remote_id: &str) -> RemoteResult<()>;

    /// Whether the subject's team forces every variable to be sensitive.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the policy cannot be read.
    fn enforces_sensitive(&self, _subject: &Subject) -> RemoteResult<bool> {
        Ok(false)
    }
}

/// Whether creating `candidate` would collide with an existing live entry.
///
/// Two entries collide when they share a key and branch and overlap in at
/// least one environment.
pub(crate) fn collides(existing: &RemoteEntry, candidate: &Entry) -> bool {
    existing.key == candidate.key
        && existing.branch() == candidate.branch()
        && (existing.targets.iter().any(|t| candidate.targets.contains(t))
            || existing
                .custom_environment_ids
                .iter()
                .any(|c| candidate.custom_environment_ids.contains(c)))
}

/// Reject a batch that collides with live entries or with itself.
pub(crate) fn check_batch(live: &[RemoteEntry], batch: &[Entry]) -> RemoteResult<()> {
    for (i, candidate) in batch.iter().enumerate() {
        if let Some(existing) = live.iter().find(|e| collides(e, candidate)) {
            return Err(RemoteError::Request(format!(
                "conflict: {} already exists as {}",
                candidate.key, existing.id
            )));
        }
        if batch[..i]
            .iter()
            .any(|e| collides(&RemoteEntry::from_entry("", e), candidate))
        {
            return Err(RemoteError::Request(format!(
                "conflict: {} declared twice in one batch",
                candidate.key
            )));
        }
    }
    Ok(())
}
