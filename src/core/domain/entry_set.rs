//! EntrySet type.
//!
//! A mapping from variable key to entry. Used for declared configuration,
//! recorded state and the partitions of an operation plan.

use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::entry::Entry;
use crate::core::types::EnvKey;

/// Entries keyed by variable name, iterated in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntrySet(BTreeMap<EnvKey, Entry>);

impl EntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry under its own key, returning any entry it replaced.
    pub fn insert(&mut self, entry: Entry) -> Option<Entry> {
        self.0.insert(entry.key.clone(), entry)
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Entry> {
        self.0.values()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, EnvKey, Entry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Remote identifiers of entries that exist remotely.
    pub fn remote_ids(&self) -> BTreeSet<&str> {
        self.0
            .values()
            .filter_map(|e| e.remote_id.as_deref())
            .collect()
    }
}

impl FromIterator<Entry> for EntrySet {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self(iter.into_iter().map(|e| (e.key.clone(), e)).collect())
    }
}

impl Extend<Entry> for EntrySet {
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl IntoIterator for EntrySet {
    type Item = Entry;
    type IntoIter = btree_map::IntoValues<EnvKey, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

impl<'a> IntoIterator for &'a EntrySet {
    type Item = (&'a EnvKey, &'a Entry);
    type IntoIter = btree_map::Iter<'a, EnvKey, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
