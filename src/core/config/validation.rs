//! Validation helper functions for configuration types.

use crate::core::errors::{CribError, Result};

/// Validate that a u32 value is greater than zero.
pub fn validate_positive_u32(value: u32, field: &str) -> Result<()> {
    if value == 0 {
        return Err(CribError::validation_field(
            format!("{} must be greater than 0", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that a string option, when present, is not blank.
pub fn validate_non_blank(value: Option<&str>, field: &str) -> Result<()> {
    if let Some(value) = value {
        if value.trim().is_empty() {
            return Err(CribError::validation_field(
                format!("{} must not be empty when set", field),
                field,
            ));
        }
    }
    Ok(())
}

/// Validate that no entry of a pattern list is empty.
///
/// An empty suffix or exclusion pattern would match every name.
pub fn validate_patterns(patterns: &[String], field: &str) -> Result<()> {
    if let Some(index) = patterns.iter().position(String::is_empty) {
        return Err(CribError::validation_field(
            format!("{}[{}] must not be an empty string", field, index),
            field,
        ));
    }
    Ok(())
}
