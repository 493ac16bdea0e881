//! Entry type.
//!
//! One named environment variable attached to a subject, together with the
//! scopes it applies to.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroizing;

use crate::core::types::{CustomEnvironmentId, EnvKey, RemoteId};
use crate::error::ValidationError;

/// A built-in deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Production,
    Preview,
    Development,
}

impl Target {
    /// Lowercase name as used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Production => "production",
            Target::Preview => "preview",
            Target::Development => "development",
        }
    }
}

impl FromStr for Target {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Target::Production),
            "preview" => Ok(Target::Preview),
            "development" => Ok(Target::Development),
            other => Err(ValidationError::UnknownTarget(other.to_string())),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plaintext secret value.
///
/// Zeroed on drop and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue(Zeroizing<String>);

impl SecretValue {
    /// Wrap a plaintext value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// The plaintext.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue(***)")
    }
}

impl From<&str> for SecretValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SecretValue {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Serialize for SecretValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// The identity used to correlate an entry across views when the remote
/// identifier is missing or has changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchKey<'a> {
    pub key: &'a str,
    pub targets: &'a BTreeSet<Target>,
    pub custom_environment_ids: &'a BTreeSet<CustomEnvironmentId>,
}

/// One environment variable.
///
/// `value` is write-only: it is never read back from sensitive remote state
/// and never persisted to the recorded state file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: EnvKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<RemoteId>,
    #[serde(skip)]
    pub value: Option<SecretValue>,
    #[serde(default)]
    pub targets: BTreeSet<Target>,
    #[serde(default)]
    pub custom_environment_ids: BTreeSet<CustomEnvironmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    /// `None` leaves the choice to the remote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Entry {
    /// Create an entry with no value and no scopes.
    pub fn new(key: impl Into<EnvKey>) -> Self {
        Self {
            key: key.into(),
            remote_id: None,
            value: None,
            targets: BTreeSet::new(),
            custom_environment_ids: BTreeSet::new(),
            git_branch: None,
            sensitive: None,
            comment: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<SecretValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_remote_id(mut self, id: impl Into<RemoteId>) -> Self {
        self.remote_id = Some(id.into());
        self
    }

    pub fn with_targets(mut self, targets: impl IntoIterator<Item = Target>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    pub fn with_custom_environments<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CustomEnvironmentId>,
    {
        self.custom_environment_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_git_branch(mut self, branch: impl Into<String>) -> Self {
        self.git_branch = Some(branch.into());
        self
    }

    pub fn with_sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = Some(sensitive);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Correlation identity of this entry.
    pub fn match_key(&self) -> MatchKey<'_> {
        MatchKey {
            key: &self.key,
            targets: &self.targets,
            custom_environment_ids: &self.custom_environment_ids,
        }
    }

    /// Whether the entry applies to at least one environment.
    pub fn has_scope(&self) -> bool {
        !self.targets.is_empty() || !self.custom_environment_ids.is_empty()
    }

    /// Comment text, empty when unset.
    pub fn comment_text(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    /// Git branch, `None` when unset or empty.
    pub fn branch(&self) -> Option<&str> {
        self.git_branch.as_deref().filter(|b| !b.is_empty())
    }

    /// The same entry without its remote identifier, as sent on create.
    pub fn detached(&self) -> Self {
        Self {
            remote_id: None,
            ..self.clone()
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}
