//! Input validation for declared entries.
//!
//! Runs before any remote call; a cycle with an invalid entry does not start.

use crate::core::constants::MAX_COMMENT_LEN;
use crate::core::domain::{Entry, EntrySet};
use crate::error::{Result, ValidationError};

/// Validate a variable key name.
///
/// Keys must be valid environment variable names:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
///
/// # Errors
///
/// Returns `ValidationError` if the key is invalid.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey.into());
    }

    if let Some(first_char) = key.chars().next() {
        if first_char.is_ascii_digit() {
            return Err(ValidationError::InvalidKey {
                key: key.to_string(),
                reason: "cannot start with a digit".to_string(),
            }
            .into());
        }
    }

    for (i, ch) in key.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(ValidationError::InvalidKey {
                key: key.to_string(),
                reason: format!(
                    "invalid character '{}' at position {}. Only letters, digits, and underscore are allowed",
                    ch,
                    i + 1
                ),
            }
            .into());
        }
    }

    Ok(())
}

/// Validate one declared entry.
///
/// # Errors
///
/// Returns `ValidationError` if the key is invalid, the entry has no scope,
/// no value, or a comment over the length limit.
pub fn validate_entry(entry: &Entry) -> Result<()> {
    validate_key(&entry.key)?;

    if !entry.has_scope() {
        return Err(ValidationError::EmptyScope(entry.key.clone()).into());
    }

    if entry.value.is_none() {
        return Err(ValidationError::MissingValue(entry.key.clone()).into());
    }

    let len = entry.comment_text().chars().count();
    if len > MAX_COMMENT_LEN {
        return Err(ValidationError::CommentTooLong {
            key: entry.key.clone(),
            len,
            max: MAX_COMMENT_LEN,
        }
        .into());
    }

    Ok(())
}

/// Validate every declared entry, stopping at the first failure.
///
/// An empty set is valid and means no variables are configured.
///
/// # Errors
///
/// Returns the first `ValidationError` found, in key order.
pub fn validate_entries(entries: &EntrySet) -> Result<()> {
    entries.values().try_for_each(validate_entry)
}

/// Validate file permissions (Unix only).
///
/// Checks that a file has the expected permissions mode.
///
/// # Errors
///
/// Returns an io error if the file cannot be inspected, or one of kind
/// `PermissionDenied` if the mode differs.
#[cfg(unix)]
pub fn validate_file_permissions(path: &std::path::Path, expected_mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path)?;
    let actual_mode = metadata.permissions().mode() & 0o777;

    if actual_mode != expected_mode {
        return Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            format!(
                "{} has permissions {:o}, expected {:o}",
                path.display(),
                actual_mode,
                expected_mode
            ),
        )
        .into());
    }

    Ok(())
}
