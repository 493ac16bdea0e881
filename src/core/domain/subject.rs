//! Subject type.
//!
//! The project and team pair a reconciliation cycle targets.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The addressable unit of reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl Subject {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            team_id: None,
        }
    }

    pub fn with_team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    /// Scope key for fingerprints, remote documents and recorded state.
    ///
    /// `project` alone, or `project/team`. `%` and `/` inside either part are
    /// percent-escaped so distinct pairs never share a key.
    pub fn id(&self) -> String {
        match self.team_id.as_deref().filter(|t| !t.is_empty()) {
            Some(team) => format!("{}/{}", escape(&self.project_id), escape(team)),
            None => escape(&self.project_id),
        }
    }

    /// File name stem for per-subject documents.
    ///
    /// A readable prefix reduced to file-safe characters, followed by a
    /// digest of [`Subject::id`] so subjects that sanitize alike stay apart.
    pub fn file_stem(&self) -> String {
        let readable: String = self
            .id()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        let digest = Sha256::digest(self.id().as_bytes());
        let suffix: String = digest[..STEM_DIGEST_BYTES]
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();

        format!("{readable}-{suffix}")
    }
}

const STEM_DIGEST_BYTES: usize = 8;

fn escape(part: &str) -> String {
    part.replace('%', "%25").replace('/', "%2F")
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}
