//! Settling policies.
//!
//! The remote is eventually consistent: recreating a variable right after
//! deleting it can collide with the not-yet-gone original. A policy runs
//! between the removals and the creations of a cycle that has both.

use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::core::constants::{DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SETTLE_SECS};
use crate::core::domain::{EntrySet, Subject};
use crate::core::remote::Remote;
use crate::error::{ReconcileError, Result};

/// Wait until removals are safe to build on.
pub trait Settle: Send + Sync {
    /// Called once, after every removal in `removed` was issued.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError` if the remote does not settle.
    fn settle(&self, remote: &dyn Remote, subject: &Subject, removed: &EntrySet) -> Result<()>;
}

/// Sleep for a fixed duration.
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_SETTLE_SECS))
    }
}

impl Settle for FixedDelay {
    fn settle(&self, _remote: &dyn Remote, subject: &Subject, _removed: &EntrySet) -> Result<()> {
        info!(subject = %subject, delay_ms = self.delay.as_millis() as u64, "waiting for removals to settle");
        thread::sleep(self.delay);
        Ok(())
    }
}

/// List the remote until none of the removed identifiers is visible.
#[derive(Debug, Clone)]
pub struct PollUntilAbsent {
    interval: Duration,
    max_attempts: u32,
}

impl PollUntilAbsent {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }
}

impl Default for PollUntilAbsent {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            DEFAULT_POLL_ATTEMPTS,
        )
    }
}

impl Settle for PollUntilAbsent {
    fn settle(&self, remote: &dyn Remote, subject: &Subject, removed: &EntrySet) -> Result<()> {
        let ids = removed.remote_ids();

        for attempt in 1..=self.max_attempts {
            let live = remote.list(subject).map_err(ReconcileError::ListFailed)?;
            let lingering = live.iter().filter(|e| ids.contains(e.id.as_str())).count();

            if lingering == 0 {
                debug!(subject = %subject, attempt, "removals settled");
                return Ok(());
            }

            debug!(subject = %subject, attempt, lingering, "removals still visible");
            if attempt < self.max_attempts {
                thread::sleep(self.interval);
            }
        }

        Err(ReconcileError::NotSettled {
            attempts: self.max_attempts,
        }
        .into())
    }
}

/// Do not wait.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Settle for NoDelay {
    fn settle(&self, _remote: &dyn Remote, _subject: &Subject, _removed: &EntrySet) -> Result<()> {
        Ok(())
    }
}
