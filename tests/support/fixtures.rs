//! Test fixtures and constants.

use envsync::core::cycle::{Outcome, Reconciliation};
use envsync::core::domain::{Entry, EntrySet, OperationPlan, RemoteEntry, Subject, Target};
use envsync::core::fingerprint::{self, Fingerprint, FingerprintStore};
use envsync::core::reconcile::{CancelToken, NoDelay};
use envsync::core::remote;
use envsync::error::Result;

/// A config with two variables and no settling delay.
pub const BASIC_CONFIG: &str = r#"
[project]
id = "prj_test"

[settle]
strategy = "none"

[variables.DATABASE_URL]
value = "postgres://localhost/app"
target = ["production", "preview"]

[variables.API_KEY]
value = "sk-test-12345"
target = ["production"]
sensitive = true
"#;

/// `BASIC_CONFIG` with API_KEY changed and DATABASE_URL dropped.
pub const CHANGED_CONFIG: &str = r#"
[project]
id = "prj_test"

[settle]
strategy = "none"

[variables.API_KEY]
value = "sk-test-67890"
target = ["production"]
sensitive = true
"#;

pub fn subject() -> Subject {
    Subject::new("prj_test")
}

/// A production entry with a value.
pub fn declared(key: &str, value: &str) -> Entry {
    Entry::new(key)
        .with_value(value)
        .with_targets([Target::Production])
}

/// A recorded production entry, as the state file would hold it.
pub fn recorded(key: &str, remote_id: &str) -> Entry {
    Entry::new(key)
        .with_remote_id(remote_id)
        .with_targets([Target::Production])
}

/// A readable live production entry.
pub fn live(remote_id: &str, key: &str, value: &str) -> RemoteEntry {
    RemoteEntry::from_entry(remote_id, &declared(key, value))
}

pub fn set<I: IntoIterator<Item = Entry>>(entries: I) -> EntrySet {
    entries.into_iter().collect()
}

/// Store the fingerprint of `value` for `key`.
pub fn remember(store: &dyn FingerprintStore, key: &str, value: &str) {
    store
        .set(&subject(), key, Fingerprint::of(&value.into()).as_bytes())
        .expect("fingerprint write");
}

/// An in-memory world: remote, fingerprints and the recorded state that
/// successive cycles carry forward.
pub struct World {
    pub subject: Subject,
    pub remote: remote::Memory,
    pub store: fingerprint::Memory,
    pub state: EntrySet,
}

impl World {
    pub fn new() -> Self {
        Self {
            subject: subject(),
            remote: remote::Memory::new(),
            store: fingerprint::Memory::new(),
            state: EntrySet::new(),
        }
    }

    pub fn cycle(&self) -> Reconciliation<'_> {
        Reconciliation::new(&self.subject, &self.remote, &self.store, &NoDelay)
    }

    pub fn plan(&self, declared: &EntrySet) -> Result<OperationPlan> {
        self.cycle().plan(declared, &self.state)
    }

    /// Apply and, on success, record the resulting state.
    pub fn apply(&mut self, declared: &EntrySet) -> Result<Outcome> {
        let outcome = self
            .cycle()
            .apply(declared, &self.state, &CancelToken::new())?;
        self.state = outcome.state.clone();
        Ok(outcome)
    }

    /// Remote identifier currently recorded for `key`.
    pub fn remote_id(&self, key: &str) -> Option<String> {
        self.state.get(key).and_then(|e| e.remote_id.clone())
    }
}
