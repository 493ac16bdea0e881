//! File-backed control plane.
//!
//! Stores the live entries of every subject in one JSON document. Stands in
//! for a hosted control plane when running locally: identifiers are random,
//! sensitive values are never listed back, and overlapping creates conflict.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{check_batch, Remote, RemoteResult};
use crate::core::domain::{Entry, RemoteEntry, Subject};
use crate::error::RemoteError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    subjects: BTreeMap<String, SubjectRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SubjectRecord {
    #[serde(default)]
    sensitive_policy: bool,
    #[serde(default)]
    entries: Vec<RemoteEntry>,
}

/// File-backed control plane.
#[derive(Debug, Clone)]
pub struct Filesystem {
    path: PathBuf,
}

impl Filesystem {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> RemoteResult<Document> {
        if !self.path.exists() {
            return Ok(Document::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, doc: &Document) -> RemoteResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(doc)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Force every new variable of `subject` to be sensitive.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the document cannot be read or written.
    pub fn set_sensitive_policy(&self, subject: &Subject, enforced: bool) -> RemoteResult<()> {
        let mut doc = self.load()?;
        doc.subjects.entry(subject.id()).or_default().sensitive_policy = enforced;
        self.save(&doc)
    }
}

impl Remote for Filesystem {
    fn list(&self, subject: &Subject) -> RemoteResult<Vec<RemoteEntry>> {
        let doc = self.load()?;
        let entries: Vec<RemoteEntry> = doc
            .subjects
            .get(&subject.id())
            .map(|record| record.entries.iter().map(RemoteEntry::redacted).collect())
            .unwrap_or_default();

        debug!(subject = %subject, entries = entries.len(), "listed remote entries");
        Ok(entries)
    }

    fn create_batch(&self, subject: &Subject, batch: &[Entry]) -> RemoteResult<Vec<RemoteEntry>> {
        let mut doc = self.load()?;
        let record = doc.subjects.entry(subject.id()).or_default();
        check_batch(&record.entries, batch)?;

        let created: Vec<RemoteEntry> = batch
            .iter()
            .map(|entry| {
                let id = format!("env_{}", Uuid::new_v4().simple());
                RemoteEntry::from_entry(id, entry)
            })
            .collect();
        record.entries.extend(created.iter().cloned());
        self.save(&doc)?;

        debug!(subject = %subject, created = created.len(), "created remote entries");
        Ok(created.iter().map(RemoteEntry::redacted).collect())
    }

    fn delete(&self, subject: &Subject, remote_id: &str) -> RemoteResult<()> {
        let mut doc = self.load()?;
        let record = doc
            .subjects
            .get_mut(&subject.id())
            .ok_or_else(|| RemoteError::NotFound(remote_id.to_string()))?;

        let before = record.entries.len();
        record.entries.retain(|e| e.id != remote_id);
        if record.entries.len() == before {
            return Err(RemoteError::NotFound(remote_id.to_string()));
        }

        self.save(&doc)
    }

    fn enforces_sensitive(&self, subject: &Subject) -> RemoteResult<bool> {
        Ok(self
            .load()?
            .subjects
            .get(&subject.id())
            .map_or(false, |record| record.sensitive_policy))
    }
}
