//! Rebuild recorded state from the live snapshot.

use tracing::debug;

use super::correlate::correlate;
use crate::core::domain::{EntrySet, RemoteEntry};

/// Recorded state as the remote currently sees it.
///
/// Each recorded key is replaced by its correlated live entry, keeping the
/// locally known write-only value. Keys with no live counterpart are
/// dropped so the next plan creates them again.
pub fn refresh(prior: &EntrySet, live: &[RemoteEntry]) -> EntrySet {
    let correlation = correlate(prior, live);

    prior
        .iter()
        .filter_map(|(key, recorded)| match correlation.get(key) {
            Some(current) => Some(current.to_entry(recorded.value.clone())),
            None => {
                debug!(key = %key, "no longer present remotely");
                None
            }
        })
        .collect()
}
