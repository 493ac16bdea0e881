//! Configuration file management.
//!
//! Handles reading and writing `envsync.toml`: the subject, where local
//! files live, the settling policy and the declared variables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::core::constants;
use crate::core::domain::{Entry, EntrySet, SecretValue, Subject, Target};
use crate::core::fingerprint;
use crate::core::reconcile::{FixedDelay, NoDelay, PollUntilAbsent, Settle};
use crate::core::remote;
use crate::core::types::EnvKey;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `envsync.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub project: ProjectConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub settle: SettleConfig,
    /// Declared variables by key.
    #[serde(default)]
    pub variables: BTreeMap<EnvKey, VariableConfig>,
}

/// The subject a cycle targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

/// Local file locations, relative to the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_state")]
    pub state: PathBuf,
    #[serde(default = "default_remote")]
    pub remote: PathBuf,
    /// Defaults to `~/.envsync/fingerprints`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprints: Option<PathBuf>,
}

fn default_state() -> PathBuf {
    PathBuf::from(constants::STATE_FILE)
}

fn default_remote() -> PathBuf {
    PathBuf::from(constants::REMOTE_FILE)
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: default_state(),
            remote: default_remote(),
            fingerprints: None,
        }
    }
}

/// Settling between removals and creations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleConfig {
    /// `fixed`, `poll` or `none`.
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_strategy() -> String {
    "fixed".to_string()
}

fn default_delay_secs() -> u64 {
    constants::DEFAULT_SETTLE_SECS
}

fn default_poll_interval_ms() -> u64 {
    constants::DEFAULT_POLL_INTERVAL_MS
}

fn default_max_attempts() -> u32 {
    constants::DEFAULT_POLL_ATTEMPTS
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            delay_secs: default_delay_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// One declared variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableConfig {
    /// Literal value. Takes precedence over `from_env`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Name of a process environment variable holding the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_env: Option<String>,
    #[serde(default)]
    pub target: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_environment_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Config {
    /// A configuration for `project`, with no variables.
    pub fn new(project: impl Into<String>, team: Option<String>) -> Self {
        Self {
            project: ProjectConfig {
                id: project.into(),
                team,
            },
            paths: PathsConfig::default(),
            settle: SettleConfig::default(),
            variables: BTreeMap::new(),
        }
    }

    /// Path to the configuration file in the current directory
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotInitialized` if the file doesn't exist,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotInitialized(path.display().to_string()).into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(
            project = %config.project.id,
            variables = config.variables.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// Save configuration to `path`.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    pub fn subject(&self) -> Subject {
        let subject = Subject::new(&self.project.id);
        match self.project.team.as_deref().filter(|t| !t.is_empty()) {
            Some(team) => subject.with_team(team),
            None => subject,
        }
    }

    /// The declared entries, with values resolved.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvValue` if a `from_env` variable is
    /// unset, or `ValidationError::UnknownTarget` for a bad target name.
    pub fn declared(&self) -> Result<EntrySet> {
        self.variables
            .iter()
            .map(|(key, var)| var.to_entry(key))
            .collect()
    }

    /// The configured settling policy.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSettleStrategy` for an unknown strategy.
    pub fn settle_policy(&self) -> Result<Box<dyn Settle>> {
        let settle = &self.settle;
        let policy: Box<dyn Settle> = match settle.strategy.as_str() {
            "fixed" => Box::new(FixedDelay::new(Duration::from_secs(settle.delay_secs))),
            "poll" => Box::new(PollUntilAbsent::new(
                Duration::from_millis(settle.poll_interval_ms),
                settle.max_attempts,
            )),
            "none" => Box::new(NoDelay),
            other => return Err(ConfigError::InvalidSettleStrategy(other.to_string()).into()),
        };
        Ok(policy)
    }

    /// Recorded state file, resolved against `base`.
    pub fn state_path(&self, base: &Path) -> PathBuf {
        base.join(&self.paths.state)
    }

    /// File-backed control plane, resolved against `base`.
    pub fn remote(&self, base: &Path) -> remote::Filesystem {
        remote::Filesystem::new(base.join(&self.paths.remote))
    }

    /// Fingerprint store, from `paths.fingerprints` or the home directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if no directory is configured and
    /// the home directory cannot be determined.
    pub fn fingerprint_store(&self, base: &Path) -> Result<fingerprint::Filesystem> {
        match &self.paths.fingerprints {
            Some(dir) => Ok(fingerprint::Filesystem::new(base.join(dir))),
            None => fingerprint::Filesystem::default_location(),
        }
    }
}

impl VariableConfig {
    fn to_entry(&self, key: &str) -> Result<Entry> {
        let targets = self
            .target
            .iter()
            .map(|t| t.parse::<Target>())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut entry = Entry::new(key)
            .with_targets(targets)
            .with_custom_environments(self.custom_environment_ids.iter().cloned());
        entry.value = self.resolve_value(key)?;
        entry.git_branch = self.git_branch.clone();
        entry.sensitive = self.sensitive;
        entry.comment = self.comment.clone();
        Ok(entry)
    }

    fn resolve_value(&self, key: &str) -> Result<Option<SecretValue>> {
        if let Some(value) = &self.value {
            return Ok(Some(SecretValue::new(value.as_str())));
        }
        match &self.from_env {
            Some(var) => std::env::var(var)
                .map(|v| Some(SecretValue::new(v)))
                .map_err(|_| {
                    ConfigError::MissingEnvValue {
                        key: key.to_string(),
                        var: var.clone(),
                    }
                    .into()
                }),
            None => Ok(None),
        }
    }
}
