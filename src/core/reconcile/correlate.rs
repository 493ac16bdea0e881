//! Correlation of live entries with recorded ones.
//!
//! The remote identifier is not stable: deleting and recreating a variable
//! out of band yields a new one. Live entries are therefore matched to
//! recorded entries first by identifier, then by [`MatchKey`].
//!
//! [`MatchKey`]: crate::core::domain::MatchKey

use std::collections::BTreeMap;

use tracing::warn;

use crate::core::domain::{Ambiguity, EntrySet, RemoteEntry};

/// Live entries matched to recorded keys.
#[derive(Debug, Default)]
pub struct Correlation<'a> {
    /// Recorded key to the live entry that currently represents it.
    pub matched: BTreeMap<&'a str, &'a RemoteEntry>,
    /// Recorded keys that matched more than one untracked live entry.
    pub ambiguities: Vec<Ambiguity>,
}

impl<'a> Correlation<'a> {
    pub fn get(&self, key: &str) -> Option<&'a RemoteEntry> {
        self.matched.get(key).copied()
    }
}

/// Match each recorded entry with at most one live entry.
///
/// 1. Live entries reported more than once under one identifier are
///    collapsed, keeping the first report.
/// 2. A live entry whose identifier is tracked in `prior` represents the
///    recorded key that holds that identifier.
/// 3. Remaining live entries are matched by `(key, targets, custom
///    environments)` to recorded keys not matched in step 2. When several
///    qualify, the smallest identifier wins and the tie is reported.
pub fn correlate<'a>(prior: &'a EntrySet, live: &'a [RemoteEntry]) -> Correlation<'a> {
    let mut unique: BTreeMap<&'a str, &'a RemoteEntry> = BTreeMap::new();
    for entry in live {
        unique.entry(entry.id.as_str()).or_insert(entry);
    }

    let tracked: BTreeMap<&'a str, &'a str> = prior
        .iter()
        .filter_map(|(key, e)| e.remote_id.as_deref().map(|id| (id, key.as_str())))
        .collect();

    let mut correlation = Correlation::default();
    for (id, entry) in &unique {
        if let Some(key) = tracked.get(id) {
            correlation.matched.insert(*key, *entry);
        }
    }

    let mut candidates: BTreeMap<&'a str, Vec<&'a RemoteEntry>> = BTreeMap::new();
    for (id, entry) in &unique {
        if tracked.contains_key(id) {
            continue;
        }
        for (key, recorded) in prior {
            if correlation.matched.contains_key(key.as_str()) {
                continue;
            }
            if recorded.match_key() == entry.match_key() {
                candidates.entry(key.as_str()).or_default().push(*entry);
            }
        }
    }

    // `unique` iterates in identifier order, so each list is already sorted
    for (key, found) in candidates {
        let Some(chosen) = found.first() else {
            continue;
        };
        if found.len() > 1 {
            let ids: Vec<String> = found.iter().map(|e| e.id.clone()).collect();
            warn!(
                key,
                chosen = %chosen.id,
                candidates = ?ids,
                "several live entries match one recorded entry"
            );
            correlation.ambiguities.push(Ambiguity {
                key: key.to_string(),
                chosen: chosen.id.clone(),
                candidates: ids,
            });
        }
        correlation.matched.insert(key, *chosen);
    }

    correlation
}
