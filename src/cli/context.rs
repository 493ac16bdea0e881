//! Shared command setup.
//!
//! Every cycle command loads the same pieces: the configuration, the
//! recorded state and the stores it reconciles against.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::Config;
use crate::core::cycle::Reconciliation;
use crate::core::domain::{EntrySet, Subject};
use crate::core::fingerprint;
use crate::core::reconcile::Settle;
use crate::core::remote;
use crate::core::state::RecordedState;
use crate::error::Result;

/// Everything a cycle command needs, loaded from `envsync.toml`.
pub struct Context {
    pub config: Config,
    pub subject: Subject,
    pub state: RecordedState,
    state_path: PathBuf,
    remote: remote::Filesystem,
    store: fingerprint::Filesystem,
    settle: Box<dyn Settle>,
}

impl Context {
    /// Load the configuration at `config_path` and everything it points to.
    ///
    /// Relative paths in the configuration resolve against its directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is missing or invalid, or
    /// `StoreError` if the recorded state cannot be read.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config = Config::load(config_path)?;
        let base = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let subject = config.subject();
        let state_path = config.state_path(base);
        let state = RecordedState::load(&state_path, &subject)?;
        let remote = config.remote(base);
        let store = config.fingerprint_store(base)?;
        let settle = config.settle_policy()?;

        debug!(
            subject = %subject,
            remote = %remote.path().display(),
            fingerprints = %store.dir().display(),
            "context loaded"
        );

        Ok(Self {
            config,
            subject,
            state,
            state_path,
            remote,
            store,
            settle,
        })
    }

    pub fn cycle(&self) -> Reconciliation<'_> {
        Reconciliation::new(&self.subject, &self.remote, &self.store, self.settle.as_ref())
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Record `entries` as the state the remote now holds.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if the state file cannot be written.
    pub fn record(&mut self, entries: EntrySet) -> Result<()> {
        self.state.entries = entries;
        self.state.save(&self.state_path)
    }
}
