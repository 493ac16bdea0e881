//! The reconciliation engine.
//!
//! A pure decision over three views: declared configuration, recorded state
//! and the live snapshot. The only outside input is the read-only
//! fingerprint lookup behind [`DriftDetector`]. Nothing here talks to the
//! remote or writes anywhere.

use tracing::{debug, info};

use super::correlate::correlate;
use super::drift::DriftDetector;
use crate::core::domain::{
    Entry, EntrySet, FingerprintUpdate, OperationPlan, RemoteEntry, ReplaceReason, Subject,
};
use crate::core::fingerprint::Fingerprint;
use crate::error::Result;

/// Compute the operation plan for one cycle.
///
/// For every recorded key:
/// - dropped from `declared`: removed, and its fingerprint cleared;
/// - no correlated live entry, a different identifier, or drift: removed
///   and created again;
/// - otherwise unchanged, taking remote-assigned fields from the live entry
///   and the write-only value from `declared`.
///
/// Declared keys never recorded are created. Every created key gets a new
/// fingerprint in the plan.
///
/// # Errors
///
/// Returns `StoreError` if a stored fingerprint cannot be read.
pub fn reconcile(
    subject: &Subject,
    declared: &EntrySet,
    prior: &EntrySet,
    live: &[RemoteEntry],
    drift: &DriftDetector<'_>,
) -> Result<OperationPlan> {
    let correlation = correlate(prior, live);
    let mut plan = OperationPlan {
        ambiguities: correlation.ambiguities.clone(),
        ..OperationPlan::default()
    };

    for (key, recorded) in prior {
        let current = correlation.get(key);

        let Some(wanted) = declared.get(key) else {
            debug!(key = %key, "removed from configuration");
            plan.to_remove.insert(addressed(recorded, current));
            plan.fingerprints
                .push(FingerprintUpdate::Clear { key: key.clone() });
            continue;
        };

        match replace_reason(subject, wanted, recorded, current, drift)? {
            Some(reason) => {
                debug!(key = %key, reason = %reason, "replacing");
                plan.to_remove.insert(addressed(recorded, current));
                plan.to_add.insert(wanted.detached());
                plan.replacements.insert(key.clone(), reason);
            }
            None => {
                if let Some(live) = current {
                    plan.unchanged
                        .insert(live.to_entry(wanted.value.clone()));
                }
            }
        }
    }

    for (key, wanted) in declared {
        if !prior.contains(key) {
            debug!(key = %key, "new variable");
            plan.to_add.insert(wanted.detached());
        }
    }

    for (key, entry) in &plan.to_add {
        if let Some(value) = &entry.value {
            plan.fingerprints.push(FingerprintUpdate::Set {
                key: key.clone(),
                fingerprint: Fingerprint::of(value),
            });
        }
    }

    info!(
        subject = %subject,
        to_add = plan.to_add.len(),
        to_remove = plan.to_remove.len(),
        unchanged = plan.unchanged.len(),
        "plan computed"
    );

    Ok(plan)
}

/// Why `recorded` must be replaced by `wanted`, or `None` to keep it.
fn replace_reason(
    subject: &Subject,
    wanted: &Entry,
    recorded: &Entry,
    current: Option<&RemoteEntry>,
    drift: &DriftDetector<'_>,
) -> Result<Option<ReplaceReason>> {
    let Some(live) = current else {
        return Ok(Some(ReplaceReason::Missing));
    };

    if recorded.remote_id.as_deref() != Some(live.id.as_str()) {
        return Ok(Some(ReplaceReason::Recreated {
            live_id: live.id.clone(),
        }));
    }

    let value_changed = match &wanted.value {
        Some(value) => drift.is_changed(subject, &wanted.key, value)?,
        None => true,
    };
    if value_changed {
        return Ok(Some(ReplaceReason::ValueChanged));
    }

    if let Some(readable) = live.readable_value() {
        if wanted.value.as_ref() != Some(readable) {
            return Ok(Some(ReplaceReason::ContentMismatch));
        }
    }

    if attributes_differ(wanted, live) {
        return Ok(Some(ReplaceReason::AttributesChanged));
    }

    Ok(None)
}

/// Whether declared attributes disagree with the live entry.
///
/// Sensitivity is only compared when declared explicitly.
fn attributes_differ(wanted: &Entry, live: &RemoteEntry) -> bool {
    wanted.match_key() != live.match_key()
        || wanted.branch() != live.branch()
        || wanted.comment_text() != live.comment
        || wanted
            .sensitive
            .map_or(false, |sensitive| sensitive != live.is_sensitive())
}

/// The recorded entry, addressed at the identifier that currently exists.
///
/// After an out-of-band recreation the live identifier is the one to
/// delete; the recorded one is already gone.
fn addressed(recorded: &Entry, current: Option<&RemoteEntry>) -> Entry {
    match current {
        Some(live) => Entry {
            remote_id: Some(live.id.clone()),
            ..recorded.clone()
        },
        None => recorded.clone(),
    }
}
