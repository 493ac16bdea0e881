//! Filesystem-based fingerprint storage.
//!
//! Keeps one JSON document per subject under `~/.envsync/fingerprints/`,
//! mapping variable keys to stored fingerprints. Each document records the
//! subject it belongs to, and a document claimed by another subject is
//! treated as absent.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::FingerprintStore;
use crate::core::constants;
use crate::core::domain::Subject;
use crate::core::validation;
use crate::error::{ConfigError, Result, StoreError};

/// Stored bytes. UTF-8 input stays readable, anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum Stored {
    Text(String),
    Bytes(Vec<u8>),
}

impl Stored {
    fn from_bytes(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::Text(text.to_string()),
            Err(_) => Self::Bytes(bytes.to_vec()),
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }
}

/// One subject's document.
#[derive(Debug, Serialize, Deserialize)]
struct Document {
    subject: String,
    #[serde(default)]
    entries: BTreeMap<String, Stored>,
}

/// Filesystem-based fingerprint storage.
#[derive(Debug, Clone)]
pub struct Filesystem {
    dir: PathBuf,
}

impl Filesystem {
    /// Store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `~/.envsync/fingerprints`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if the home directory is unknown.
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::new(home.join(constants::FINGERPRINT_DIR)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Document holding one subject's fingerprints.
    fn subject_path(&self, subject: &Subject) -> PathBuf {
        self.dir.join(format!("{}.json", subject.file_stem()))
    }

    fn load(&self, subject: &Subject) -> Result<BTreeMap<String, Stored>> {
        let path = self.subject_path(subject);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        #[cfg(unix)]
        {
            if let Err(e) = validation::validate_file_permissions(&path, 0o600) {
                warn!(path = %path.display(), "{}", e);
            }
        }

        let contents = fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let doc: Document = serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        if doc.subject != subject.id() {
            warn!(path = %path.display(), found = %doc.subject, "fingerprints belong to another subject");
            return Ok(BTreeMap::new());
        }
        Ok(doc.entries)
    }

    fn save(&self, subject: &Subject, map: BTreeMap<String, Stored>) -> Result<()> {
        let path = self.subject_path(subject);
        let write_err = |source| StoreError::Write {
            path: path.display().to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;

        let entries = map.len();
        let doc = Document {
            subject: subject.id(),
            entries: map,
        };
        let contents = serde_json::to_string_pretty(&doc).map_err(|source| StoreError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        // Write beside the target and rename so readers never see a torn file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600)).map_err(write_err)?;
        }

        fs::rename(&tmp, &path).map_err(write_err)?;
        debug!(subject = %subject, entries, "fingerprints saved");
        Ok(())
    }
}

impl FingerprintStore for Filesystem {
    fn get(&self, subject: &Subject, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.load(subject)?.remove(key).map(Stored::into_bytes))
    }

    fn set(&self, subject: &Subject, key: &str, bytes: &[u8]) -> Result<()> {
        let mut map = self.load(subject)?;
        map.insert(key.to_string(), Stored::from_bytes(bytes));
        self.save(subject, map)
    }

    fn clear(&self, subject: &Subject, key: &str) -> Result<()> {
        let mut map = self.load(subject)?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.save(subject, map)
    }
}
