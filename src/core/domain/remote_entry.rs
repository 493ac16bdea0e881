//! Remote entry type.
//!
//! The live view of one environment variable as reported by the control
//! plane.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::entry::{Entry, MatchKey, SecretValue, Target};
use crate::core::types::{CustomEnvironmentId, EnvKey, RemoteId};

/// How the remote stores a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Encrypted at rest and never returned.
    Sensitive,
    /// Encrypted at rest, returned when decrypted.
    #[default]
    Encrypted,
    /// Stored as-is.
    Plain,
}

/// One live entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub id: RemoteId,
    pub key: EnvKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<SecretValue>,
    #[serde(default)]
    pub targets: BTreeSet<Target>,
    #[serde(default)]
    pub custom_environment_ids: BTreeSet<CustomEnvironmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(default)]
    pub kind: ValueKind,
    #[serde(default)]
    pub comment: String,
    /// Whether `value` holds the decrypted plaintext.
    #[serde(default)]
    pub decrypted: bool,
}

impl RemoteEntry {
    /// Materialize a declared entry under a new remote identifier.
    pub fn from_entry(id: impl Into<RemoteId>, entry: &Entry) -> Self {
        let kind = if entry.sensitive == Some(true) {
            ValueKind::Sensitive
        } else {
            ValueKind::Encrypted
        };

        Self {
            id: id.into(),
            key: entry.key.clone(),
            value: entry.value.clone(),
            targets: entry.targets.clone(),
            custom_environment_ids: entry.custom_environment_ids.clone(),
            git_branch: entry.git_branch.clone(),
            kind,
            comment: entry.comment.clone().unwrap_or_default(),
            decrypted: true,
        }
    }

    /// Correlation identity of this entry.
    pub fn match_key(&self) -> MatchKey<'_> {
        MatchKey {
            key: &self.key,
            targets: &self.targets,
            custom_environment_ids: &self.custom_environment_ids,
        }
    }

    pub fn is_sensitive(&self) -> bool {
        self.kind == ValueKind::Sensitive
    }

    /// Git branch, `None` when unset or empty.
    pub fn branch(&self) -> Option<&str> {
        self.git_branch.as_deref().filter(|b| !b.is_empty())
    }

    /// The plaintext, if the remote returned it in comparable form.
    pub fn readable_value(&self) -> Option<&SecretValue> {
        if self.decrypted && !self.is_sensitive() {
            self.value.as_ref()
        } else {
            None
        }
    }

    /// This entry as the remote would report it on a list call.
    pub fn redacted(&self) -> Self {
        if self.is_sensitive() {
            Self {
                value: None,
                decrypted: false,
                ..self.clone()
            }
        } else {
            self.clone()
        }
    }

    /// Convert to a recorded entry, carrying a locally known write-only value.
    pub fn to_entry(&self, value: Option<SecretValue>) -> Entry {
        Entry {
            key: self.key.clone(),
            remote_id: Some(self.id.clone()),
            value,
            targets: self.targets.clone(),
            custom_environment_ids: self.custom_environment_ids.clone(),
            git_branch: self.git_branch.clone(),
            sensitive: Some(self.is_sensitive()),
            comment: if self.comment.is_empty() {
                None
            } else {
                Some(self.comment.clone())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared() -> Entry {
        Entry::new("API_KEY")
            .with_value("sk-123")
            .with_targets([Target::Production])
            .with_comment("billing")
    }

    #[test]
    fn test_from_entry_kind() {
        let plain = RemoteEntry::from_entry("env_1", &declared());
        assert_eq!(plain.kind, ValueKind::Encrypted);

        let sensitive = RemoteEntry::from_entry("env_2", &declared().with_sensitive(true));
        assert_eq!(sensitive.kind, ValueKind::Sensitive);
    }

    #[test]
    fn test_readable_value() {
        let encrypted = RemoteEntry::from_entry("env_1", &declared());
        assert_eq!(encrypted.readable_value().map(|v| v.expose()), Some("sk-123"));

        let undecrypted = RemoteEntry {
            decrypted: false,
            ..encrypted.clone()
        };
        assert!(undecrypted.readable_value().is_none());

        let sensitive = RemoteEntry::from_entry("env_2", &declared().with_sensitive(true));
        assert!(sensitive.readable_value().is_none());
    }

    #[test]
    fn test_redacted_hides_sensitive_values() {
        let sensitive = RemoteEntry::from_entry("env_2", &declared().with_sensitive(true));
        let listed = sensitive.redacted();
        assert!(listed.value.is_none());
        assert!(!listed.decrypted);

        let encrypted = RemoteEntry::from_entry("env_1", &declared());
        assert_eq!(encrypted.redacted(), encrypted);
    }

    #[test]
    fn test_to_entry_carries_remote_fields() {
        let live = RemoteEntry::from_entry("env_1", &declared());
        let entry = live.to_entry(None);

        assert_eq!(entry.remote_id.as_deref(), Some("env_1"));
        assert_eq!(entry.sensitive, Some(false));
        assert_eq!(entry.comment.as_deref(), Some("billing"));
        assert_eq!(entry.value, None);
        assert_eq!(entry.match_key(), live.match_key());
    }

    #[test]
    fn test_to_entry_empty_comment_is_none() {
        let live = RemoteEntry::from_entry("env_1", &Entry::new("A").with_targets([Target::Preview]));
        assert_eq!(live.to_entry(None).comment, None);
    }
}
