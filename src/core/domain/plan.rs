//! Operation plan type.
//!
//! The result of one reconciliation: what to remove, what to (re)create and
//! what to leave alone. Computed fresh every cycle and never persisted.

use std::collections::BTreeMap;
use std::fmt;

use super::entry_set::EntrySet;
use crate::core::fingerprint::Fingerprint;
use crate::core::types::{EnvKey, RemoteId};

/// Why a retained key is deleted and created again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceReason {
    /// No live entry correlates with the recorded one.
    Missing,
    /// The live entry was recreated out of band under a new identifier.
    Recreated { live_id: RemoteId },
    /// The declared value no longer matches its stored fingerprint.
    ValueChanged,
    /// The remote returned a readable value that differs from the declared one.
    ContentMismatch,
    /// Scopes, branch, comment or sensitivity differ from the live entry.
    AttributesChanged,
}

impl fmt::Display for ReplaceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplaceReason::Missing => f.write_str("missing remotely"),
            ReplaceReason::Recreated { live_id } => write!(f, "recreated remotely as {}", live_id),
            ReplaceReason::ValueChanged => f.write_str("value changed"),
            ReplaceReason::ContentMismatch => f.write_str("remote value differs"),
            ReplaceReason::AttributesChanged => f.write_str("attributes changed"),
        }
    }
}

/// A fingerprint write the cycle commits once the remote calls succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FingerprintUpdate {
    Set { key: EnvKey, fingerprint: Fingerprint },
    Clear { key: EnvKey },
}

/// More than one live entry matched a recorded entry's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    pub key: EnvKey,
    /// The candidate that won the tie-break (smallest identifier).
    pub chosen: RemoteId,
    /// Every candidate, in identifier order.
    pub candidates: Vec<RemoteId>,
}

/// The three partitions of one cycle, plus the bookkeeping the cycle needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationPlan {
    pub to_add: EntrySet,
    pub to_remove: EntrySet,
    pub unchanged: EntrySet,
    /// Keys present in both `to_add` and `to_remove`, with the reason.
    pub replacements: BTreeMap<EnvKey, ReplaceReason>,
    pub fingerprints: Vec<FingerprintUpdate>,
    pub ambiguities: Vec<Ambiguity>,
}

impl OperationPlan {
    /// Whether applying this plan issues any remote call.
    pub fn has_changes(&self) -> bool {
        !self.to_add.is_empty() || !self.to_remove.is_empty()
    }

    /// Keys only created.
    pub fn additions(&self) -> Vec<&str> {
        self.to_add
            .keys()
            .filter(|k| !self.replacements.contains_key(*k))
            .collect()
    }

    /// Keys only removed.
    pub fn removals(&self) -> Vec<&str> {
        self.to_remove
            .keys()
            .filter(|k| !self.replacements.contains_key(*k))
            .collect()
    }
}
