//! Recorded state.
//!
//! What the last successful cycle believes exists remotely, persisted as
//! JSON next to the configuration. Write-only values are never written.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::domain::{EntrySet, Subject};
use crate::error::{Result, StoreError};

/// Recorded state of one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedState {
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entries: EntrySet,
}

impl RecordedState {
    /// Empty state for `subject`.
    pub fn empty(subject: &Subject) -> Self {
        Self {
            subject: subject.id(),
            updated_at: None,
            entries: EntrySet::new(),
        }
    }

    pub fn with_entries(subject: &Subject, entries: EntrySet) -> Self {
        Self {
            entries,
            ..Self::empty(subject)
        }
    }

    /// Load the state at `path`; a missing file is an empty state.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Parse` for malformed JSON and
    /// `StoreError::SubjectMismatch` if the file belongs to another subject.
    pub fn load(path: &Path, subject: &Subject) -> Result<Self> {
        debug!(path = %path.display(), "loading state");

        if !path.exists() {
            return Ok(Self::empty(subject));
        }

        let contents = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let state: Self = serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        if state.subject != subject.id() {
            return Err(StoreError::SubjectMismatch {
                path: path.display().to_string(),
                found: state.subject,
                expected: subject.id(),
            }
            .into());
        }

        debug!(entries = state.entries.len(), "state loaded");
        Ok(state)
    }

    /// Stamp and write the state to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if the file cannot be written.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), entries = self.entries.len(), "saving state");

        let write_err = |source: std::io::Error| StoreError::Write {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        self.updated_at = Some(Utc::now());
        let contents = serde_json::to_string_pretty(self).map_err(|source| StoreError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, contents).map_err(write_err)?;
        Ok(())
    }
}
