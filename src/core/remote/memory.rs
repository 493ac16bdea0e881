//! In-memory control plane.
//!
//! Behaves like the real remote (identifier assignment, sensitive values
//! hidden on list, conflicts on overlapping creates) and records every call
//! so tests can assert ordering. Failures and out-of-band edits can be
//! injected.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{check_batch, Remote, RemoteResult};
use crate::core::domain::{Entry, RemoteEntry, Subject};
use crate::core::types::{EnvKey, RemoteId};
use crate::error::RemoteError;

/// A call received by [`Memory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(Vec<EnvKey>),
    Delete(RemoteId),
}

#[derive(Debug, Default)]
struct Inner {
    subjects: HashMap<String, Vec<RemoteEntry>>,
    gone: HashSet<String>,
    calls: Vec<Call>,
    delete_failures: HashMap<RemoteId, String>,
    create_failure: Option<String>,
    list_failure: Option<String>,
    sensitive_policy: bool,
    duplicate_listings: bool,
    next_id: u64,
}

/// In-memory control plane.
#[derive(Debug, Default)]
pub struct Memory {
    inner: Mutex<Inner>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Place a live entry directly, as an out-of-band edit would.
    pub fn insert(&self, subject: &Subject, entry: RemoteEntry) {
        self.lock()
            .subjects
            .entry(subject.id())
            .or_default()
            .push(entry);
    }

    /// Delete a live entry out of band.
    pub fn remove(&self, subject: &Subject, remote_id: &str) {
        if let Some(entries) = self.lock().subjects.get_mut(&subject.id()) {
            entries.retain(|e| e.id != remote_id);
        }
    }

    /// Live entries of a subject, values included.
    pub fn entries(&self, subject: &Subject) -> Vec<RemoteEntry> {
        self.lock()
            .subjects
            .get(&subject.id())
            .cloned()
            .unwrap_or_default()
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Make deleting `remote_id` fail with a non-recoverable error.
    pub fn fail_delete(&self, remote_id: &str, message: &str) {
        self.lock()
            .delete_failures
            .insert(remote_id.to_string(), message.to_string());
    }

    /// Make the next create batch fail.
    pub fn fail_create(&self, message: &str) {
        self.lock().create_failure = Some(message.to_string());
    }

    /// Make list calls fail.
    pub fn fail_list(&self, message: &str) {
        self.lock().list_failure = Some(message.to_string());
    }

    /// Remove the subject entirely; list reports not-found.
    pub fn drop_subject(&self, subject: &Subject) {
        let mut inner = self.lock();
        inner.subjects.remove(&subject.id());
        inner.gone.insert(subject.id());
    }

    /// Force every new variable to be sensitive.
    pub fn set_sensitive_policy(&self, enforced: bool) {
        self.lock().sensitive_policy = enforced;
    }

    /// Report every live entry twice on list.
    pub fn set_duplicate_listings(&self, duplicate: bool) {
        self.lock().duplicate_listings = duplicate;
    }
}

impl Remote for Memory {
    fn list(&self, subject: &Subject) -> RemoteResult<Vec<RemoteEntry>> {
        let mut inner = self.lock();
        inner.calls.push(Call::List);

        if let Some(message) = inner.list_failure.clone() {
            return Err(RemoteError::Request(message));
        }
        if inner.gone.contains(&subject.id()) {
            return Err(RemoteError::NotFound(subject.id()));
        }

        let entries: Vec<RemoteEntry> = inner
            .subjects
            .get(&subject.id())
            .map(|entries| entries.iter().map(RemoteEntry::redacted).collect())
            .unwrap_or_default();

        if inner.duplicate_listings {
            Ok(entries.iter().chain(entries.iter()).cloned().collect())
        } else {
            Ok(entries)
        }
    }

    fn create_batch(&self, subject: &Subject, batch: &[Entry]) -> RemoteResult<Vec<RemoteEntry>> {
        let mut inner = self.lock();
        inner
            .calls
            .push(Call::Create(batch.iter().map(|e| e.key.clone()).collect()));

        if let Some(message) = inner.create_failure.take() {
            return Err(RemoteError::Request(message));
        }
        if inner.gone.contains(&subject.id()) {
            return Err(RemoteError::NotFound(subject.id()));
        }

        let existing = inner
            .subjects
            .get(&subject.id())
            .cloned()
            .unwrap_or_default();
        check_batch(&existing, batch)?;

        let mut created = Vec::with_capacity(batch.len());
        for entry in batch {
            inner.next_id += 1;
            let id = format!("env_{}", inner.next_id);
            created.push(RemoteEntry::from_entry(id, entry));
        }
        inner
            .subjects
            .entry(subject.id())
            .or_default()
            .extend(created.iter().cloned());

        Ok(created.iter().map(RemoteEntry::redacted).collect())
    }

    fn delete(&self, subject: &Subject, remote_id: &str) -> RemoteResult<()> {
        let mut inner = self.lock();
        inner.calls.push(Call::Delete(remote_id.to_string()));

        if let Some(message) = inner.delete_failures.get(remote_id).cloned() {
            return Err(RemoteError::Request(message));
        }

        let entries = inner
            .subjects
            .get_mut(&subject.id())
            .ok_or_else(|| RemoteError::NotFound(remote_id.to_string()))?;
        let before = entries.len();
        entries.retain(|e| e.id != remote_id);

        if entries.len() == before {
            return Err(RemoteError::NotFound(remote_id.to_string()));
        }
        Ok(())
    }

    fn enforces_sensitive(&self, _subject: &Subject) -> RemoteResult<bool> {
        Ok(self.lock().sensitive_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::Target;

    fn subject() -> Subject {
        Subject::new("prj_1")
    }

    fn declared(key: &str) -> Entry {
        Entry::new(key)
            .with_value("v")
            .with_targets([Target::Production])
    }

    #[test]
    fn test_create_assigns_ids_and_lists() {
        let remote = Memory::new();
        let created = remote
            .create_batch(&subject(), &[declared("A"), declared("B")])
            .unwrap();

        assert_eq!(created.len(), 2);
        assert_ne!(created[0].id, created[1].id);
        assert_eq!(remote.list(&subject()).unwrap().len(), 2);
        assert_eq!(
            remote.calls(),
            vec![
                Call::Create(vec!["A".to_string(), "B".to_string()]),
                Call::List
            ]
        );
    }

    #[test]
    fn test_list_hides_sensitive_values() {
        let remote = Memory::new();
        remote
            .create_batch(&subject(), &[declared("A").with_sensitive(true)])
            .unwrap();

        let listed = remote.list(&subject()).unwrap();
        assert!(listed[0].value.is_none());
        assert!(!listed[0].decrypted);
        assert!(remote.entries(&subject())[0].value.is_some());
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let remote = Memory::new();
        let err = remote.delete(&subject(), "env_404").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_conflict() {
        let remote = Memory::new();
        remote.create_batch(&subject(), &[declared("A")]).unwrap();
        let err = remote.create_batch(&subject(), &[declared("A")]).unwrap_err();
        assert!(!err.is_not_found());
        assert_eq!(remote.entries(&subject()).len(), 1);
    }

    #[test]
    fn test_dropped_subject_is_not_found() {
        let remote = Memory::new();
        remote.drop_subject(&subject());
        assert!(remote.list(&subject()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicate_listings() {
        let remote = Memory::new();
        remote.create_batch(&subject(), &[declared("A")]).unwrap();
        remote.set_duplicate_listings(true);
        assert_eq!(remote.list(&subject()).unwrap().len(), 2);
    }

    #[test]
    fn test_injected_create_failure_is_one_shot() {
        let remote = Memory::new();
        remote.fail_create("boom");
        assert!(remote.create_batch(&subject(), &[declared("A")]).is_err());
        assert!(remote.create_batch(&subject(), &[declared("A")]).is_ok());
    }
}
