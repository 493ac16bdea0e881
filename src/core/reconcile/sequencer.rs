//! Change sequencing.
//!
//! Turns an operation plan into remote calls: every removal first, then the
//! settling policy if anything was removed, then one batched create.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::settle::Settle;
use crate::core::domain::{EntrySet, OperationPlan, RemoteEntry, Subject};
use crate::core::remote::Remote;
use crate::error::{ReconcileError, Result};

/// Cooperative cancellation shared with the host.
///
/// Checked before each remote call and before settling, never during a
/// batch create.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Fail with `ReconcileError::Cancelled` if cancellation was requested.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::Cancelled` naming `stage`.
    pub fn check(&self, stage: &'static str) -> Result<()> {
        if self.is_cancelled() {
            return Err(ReconcileError::Cancelled(stage).into());
        }
        Ok(())
    }
}

/// Issues the remote calls for a plan.
pub struct ChangeSequencer<'a> {
    remote: &'a dyn Remote,
    settle: &'a dyn Settle,
}

impl<'a> ChangeSequencer<'a> {
    pub fn new(remote: &'a dyn Remote, settle: &'a dyn Settle) -> Self {
        Self { remote, settle }
    }

    /// Apply `plan` and return the entries that now exist.
    ///
    /// A not-found answer to a delete counts as success. Any other failure
    /// stops the sequence; calls already made are not undone.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::DeleteFailed` or `ReconcileError::CreateFailed`
    /// naming the failing entry, `ReconcileError::Cancelled`, or the settling
    /// policy's error.
    pub fn apply(&self, subject: &Subject, plan: &OperationPlan, cancel: &CancelToken) -> Result<EntrySet> {
        let deleted = self.remove_all(subject, &plan.to_remove, cancel)?;

        let mut applied = plan.unchanged.clone();
        if plan.to_add.is_empty() {
            return Ok(applied);
        }

        if deleted > 0 {
            cancel.check("settling")?;
            self.settle.settle(self.remote, subject, &plan.to_remove)?;
        }

        cancel.check("create")?;
        let batch: Vec<_> = plan.to_add.values().cloned().collect();
        let created = self
            .remote
            .create_batch(subject, &batch)
            .map_err(|source| ReconcileError::CreateFailed {
                keys: plan.to_add.keys().map(str::to_string).collect(),
                source,
            })?;

        info!(subject = %subject, created = created.len(), "created environment variables");
        merge_created(&mut applied, &created, &plan.to_add);
        Ok(applied)
    }

    /// Delete every entry, returning how many deletes were issued.
    fn remove_all(&self, subject: &Subject, to_remove: &EntrySet, cancel: &CancelToken) -> Result<usize> {
        let mut issued = 0;

        for (key, entry) in to_remove {
            cancel.check("delete")?;

            let Some(remote_id) = entry.remote_id.as_deref() else {
                debug!(key = %key, "never created remotely, nothing to delete");
                continue;
            };

            issued += 1;
            match self.remote.delete(subject, remote_id) {
                Ok(()) => info!(subject = %subject, key = %key, remote_id, "deleted environment variable"),
                Err(e) if e.is_not_found() => {
                    debug!(key = %key, remote_id, "already absent");
                }
                Err(source) => {
                    return Err(ReconcileError::DeleteFailed {
                        key: key.clone(),
                        remote_id: remote_id.to_string(),
                        source,
                    }
                    .into())
                }
            }
        }

        Ok(issued)
    }
}

/// Fold created entries into `applied`.
///
/// The remote may report one identifier twice. Write-only values come from
/// the plan, since the remote does not return them.
fn merge_created(applied: &mut EntrySet, created: &[RemoteEntry], to_add: &EntrySet) {
    let mut seen = std::collections::BTreeSet::new();

    for entry in created {
        if !seen.insert(entry.id.as_str()) {
            continue;
        }
        let value = to_add.get(&entry.key).and_then(|e| e.value.clone());
        applied.insert(entry.to_entry(value));
    }

    for key in to_add.keys() {
        if !applied.contains(key) {
            warn!(key, "remote did not report a created variable");
        }
    }
}
