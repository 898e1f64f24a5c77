//! Input validation for hubops operations.
//!
//! Cluster and hub names are joined onto the repository root, so anything
//! that could walk out of `clusters/` or `hubs/` is rejected up front.

use crate::error::{LayoutError, Result};

/// Validate a cluster or hub name.
///
/// Names must:
/// - Be non-empty
/// - Contain only A-Z, a-z, 0-9, `-`, and `_`
/// - Not start with `_` (reserved for `hubs/_common`)
///
/// # Errors
///
/// Returns `LayoutError::InvalidIdentity` if the name is invalid.
pub fn validate_identity(kind: &'static str, name: &str) -> Result<()> {
    let invalid = |reason: String| LayoutError::InvalidIdentity {
        kind,
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("cannot be empty".to_string()).into());
    }

    if name.starts_with('_') {
        return Err(invalid("names starting with '_' are reserved".to_string()).into());
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '-' && ch != '_' {
            return Err(invalid(format!(
                "invalid character '{}' at position {}. Only A-Z, a-z, 0-9, '-' and '_' are allowed",
                ch,
                i + 1
            ))
            .into());
        }
    }

    Ok(())
}
