//! In-memory fingerprint storage.
//!
//! Lives as long as the process. Useful for tests and for hosts that keep
//! their own persistence.

use std::collections::HashMap;
use std::sync::Mutex;

use super::FingerprintStore;
use crate::core::domain::Subject;
use crate::error::{Result, StoreError};

/// Fingerprints held in a process-local map.
#[derive(Debug, Default)]
pub struct Memory {
    entries: Mutex<HashMap<(String, String), Vec<u8>>>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored fingerprints across all subjects.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FingerprintStore for Memory {
    fn get(&self, subject: &Subject, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(&(subject.id(), key.to_string())).cloned())
    }

    fn set(&self, subject: &Subject, key: &str, bytes: &[u8]) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert((subject.id(), key.to_string()), bytes.to_vec());
        Ok(())
    }

    fn clear(&self, subject: &Subject, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.remove(&(subject.id(), key.to_string()));
        Ok(())
    }
}
