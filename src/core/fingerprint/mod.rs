//! Content fingerprints for write-only values.
//!
//! The remote never returns sensitive values, so equality cannot be checked
//! by reading them back. Instead a SHA-256 digest of the declared plaintext
//! is stored per `(subject, key)` and compared on the next cycle.
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement the `FingerprintStore` trait
//! 2. Add the implementation in a new file (e.g., `sqlite.rs`)
//! 3. Re-export from this module
//!
//! ## Example
//!
//! ```ignore
//! struct Sqlite { /* ... */ }
//!
//! impl FingerprintStore for Sqlite {
//!     fn get(&self, subject: &Subject, key: &str) -> Result<Option<Vec<u8>>> {
//!         // SELECT bytes FROM fingerprints WHERE subject = ? AND key = ?
//!     }
//!     fn set(&self, subject: &Subject, key: &str, bytes: &[u8]) -> Result<()> {
//!         // INSERT OR REPLACE
//!     }
//!     fn clear(&self, subject: &Subject, key: &str) -> Result<()> {
//!         // DELETE
//!     }
//! }
//! ```

use std::fmt;

use sha2::{Digest, Sha256};

use crate::core::domain::{SecretValue, Subject};
use crate::error::Result;

mod fs;
mod memory;

pub use fs::Filesystem;
pub use memory::Memory;

/// Per-subject byte store that outlives the process.
///
/// Implementations must scope keys by subject so distinct subjects never
/// share entries.
pub trait FingerprintStore: Send + Sync {
    /// Stored bytes for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be read.
    fn get(&self, subject: &Subject, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `bytes` for `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn set(&self, subject: &Subject, key: &str, bytes: &[u8]) -> Result<()>;

    /// Remove the stored bytes for `key`. Clearing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn clear(&self, subject: &Subject, key: &str) -> Result<()>;
}

/// Lowercase hex SHA-256 of a plaintext value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Digest of the exact plaintext bytes. No normalization is applied.
    pub fn of(value: &SecretValue) -> Self {
        Self::of_bytes(value.expose().as_bytes())
    }

    pub fn of_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        Self(digest.iter().map(|b| format!("{:02x}", b)).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bytes written to a store.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Whether stored bytes hold this fingerprint.
    ///
    /// Accepts the legacy form wrapped in double quotes.
    pub fn matches_stored(&self, stored: &[u8]) -> bool {
        match std::str::from_utf8(stored) {
            Ok(s) => s.trim_matches('"') == self.0,
            Err(_) => false,
        }
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", &self.0[..12.min(self.0.len())])
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
