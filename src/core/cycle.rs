//! Reconciliation cycles.
//!
//! Binds a subject to its remote, fingerprint store and settling policy and
//! runs whole cycles: validate, list, plan, and optionally apply.

use tracing::{debug, info, warn};

use crate::core::domain::{EntrySet, OperationPlan, RemoteEntry, Subject};
use crate::core::fingerprint::FingerprintStore;
use crate::core::reconcile::{self, CancelToken, ChangeSequencer, DriftDetector, Settle};
use crate::core::remote::Remote;
use crate::core::validation;
use crate::error::{Error, ReconcileError, Result, ValidationError};

/// The result of applying a plan.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub plan: OperationPlan,
    /// Entries that now exist remotely, to be recorded.
    pub state: EntrySet,
}

/// One subject and the collaborators a cycle needs.
pub struct Reconciliation<'a> {
    subject: &'a Subject,
    remote: &'a dyn Remote,
    store: &'a dyn FingerprintStore,
    settle: &'a dyn Settle,
}

impl<'a> Reconciliation<'a> {
    pub fn new(
        subject: &'a Subject,
        remote: &'a dyn Remote,
        store: &'a dyn FingerprintStore,
        settle: &'a dyn Settle,
    ) -> Self {
        Self {
            subject,
            remote,
            store,
            settle,
        }
    }

    pub fn subject(&self) -> &Subject {
        self.subject
    }

    /// Compute the plan without changing anything.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for invalid declared entries, or
    /// `ReconcileError` if the remote cannot be listed.
    pub fn plan(&self, declared: &EntrySet, prior: &EntrySet) -> Result<OperationPlan> {
        self.validate(declared, prior)?;
        let live = self.snapshot()?;
        reconcile::reconcile(
            self.subject,
            declared,
            prior,
            &live,
            &DriftDetector::new(self.store),
        )
    }

    /// Plan, apply and commit fingerprints.
    ///
    /// Fingerprints are written only after every remote call succeeded, so a
    /// failed cycle is retried in full next time.
    ///
    /// # Errors
    ///
    /// Returns the first validation, remote or store failure.
    pub fn apply(&self, declared: &EntrySet, prior: &EntrySet, cancel: &CancelToken) -> Result<Outcome> {
        let plan = self.plan(declared, prior)?;
        self.apply_plan(plan, cancel)
    }

    /// Apply a plan computed earlier, such as one a user confirmed, without
    /// listing the remote again.
    ///
    /// # Errors
    ///
    /// Returns the first remote or store failure.
    pub fn apply_plan(&self, plan: OperationPlan, cancel: &CancelToken) -> Result<Outcome> {
        if !plan.has_changes() {
            debug!(subject = %self.subject, "nothing to apply");
        }

        let state = ChangeSequencer::new(self.remote, self.settle).apply(self.subject, &plan, cancel)?;
        DriftDetector::new(self.store).commit(self.subject, &plan.fingerprints)?;

        info!(
            subject = %self.subject,
            added = plan.to_add.len(),
            removed = plan.to_remove.len(),
            "apply complete"
        );
        Ok(Outcome { plan, state })
    }

    /// Rebuild recorded state from the remote.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::ListFailed` if the remote cannot be listed.
    pub fn refresh(&self, prior: &EntrySet) -> Result<EntrySet> {
        if prior.remote_ids().is_empty() {
            debug!(subject = %self.subject, "nothing tracked, skipping refresh");
            return Ok(prior.clone());
        }

        match self.snapshot() {
            Ok(live) => Ok(reconcile::refresh(prior, &live)),
            Err(Error::Reconcile(ReconcileError::SubjectNotFound(_))) => {
                warn!(subject = %self.subject, "subject no longer exists remotely");
                Ok(EntrySet::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Delete every recorded entry and clear its fingerprint.
    ///
    /// Returns how many entries were deleted or already absent.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::DeleteFailed` naming the first entry that
    /// could not be deleted.
    pub fn destroy(&self, prior: &EntrySet, cancel: &CancelToken) -> Result<usize> {
        let mut destroyed = 0;

        for (key, entry) in prior {
            cancel.check("delete")?;

            if let Some(remote_id) = entry.remote_id.as_deref() {
                match self.remote.delete(self.subject, remote_id) {
                    Ok(()) => {}
                    Err(e) if e.is_not_found() => debug!(key = %key, remote_id, "already absent"),
                    Err(source) => {
                        return Err(ReconcileError::DeleteFailed {
                            key: key.clone(),
                            remote_id: remote_id.to_string(),
                            source,
                        }
                        .into())
                    }
                }
                destroyed += 1;
            }

            self.store.clear(self.subject, key)?;
        }

        info!(subject = %self.subject, destroyed, "destroy complete");
        Ok(destroyed)
    }

    /// Check declared entries, including the team's sensitivity policy for
    /// keys that will be created.
    fn validate(&self, declared: &EntrySet, prior: &EntrySet) -> Result<()> {
        validation::validate_entries(declared)?;

        let opted_out: Vec<String> = declared
            .values()
            .filter(|e| !prior.contains(&e.key) && e.sensitive == Some(false))
            .map(|e| e.key.clone())
            .collect();
        if opted_out.is_empty() {
            return Ok(());
        }

        let enforced = self
            .remote
            .enforces_sensitive(self.subject)
            .map_err(ReconcileError::ListFailed)?;
        if enforced {
            return Err(ValidationError::SensitivePolicy(opted_out).into());
        }
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<RemoteEntry>> {
        self.remote.list(self.subject).map_err(|e| {
            if e.is_not_found() {
                ReconcileError::SubjectNotFound(self.subject.id()).into()
            } else {
                ReconcileError::ListFailed(e).into()
            }
        })
    }
}
