//! Drift detection for write-only values.

use tracing::debug;

use crate::core::domain::{FingerprintUpdate, SecretValue, Subject};
use crate::core::fingerprint::{Fingerprint, FingerprintStore};
use crate::error::Result;

/// Decides whether a write-only value changed since it was last written.
pub struct DriftDetector<'a> {
    store: &'a dyn FingerprintStore,
}

impl<'a> DriftDetector<'a> {
    pub fn new(store: &'a dyn FingerprintStore) -> Self {
        Self { store }
    }

    /// Whether `candidate` differs from the value last written for `key`.
    ///
    /// Only a stored fingerprint that matches exactly means unchanged; a
    /// missing one counts as changed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the fingerprint cannot be read.
    pub fn is_changed(&self, subject: &Subject, key: &str, candidate: &SecretValue) -> Result<bool> {
        let fingerprint = Fingerprint::of(candidate);

        match self.store.get(subject, key)? {
            Some(stored) if fingerprint.matches_stored(&stored) => Ok(false),
            Some(_) => {
                debug!(key, "fingerprint mismatch");
                Ok(true)
            }
            None => {
                debug!(key, "no stored fingerprint");
                Ok(true)
            }
        }
    }

    /// Write the fingerprint updates a plan decided on.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on the first update that cannot be written.
    pub fn commit(&self, subject: &Subject, updates: &[FingerprintUpdate]) -> Result<()> {
        for update in updates {
            match update {
                FingerprintUpdate::Set { key, fingerprint } => {
                    self.store.set(subject, key, fingerprint.as_bytes())?
                }
                FingerprintUpdate::Clear { key } => self.store.clear(subject, key)?,
            }
        }
        debug!(subject = %subject, updates = updates.len(), "fingerprints committed");
        Ok(())
    }
}
