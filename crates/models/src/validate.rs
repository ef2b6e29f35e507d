//! Field checks shared by the entity modules.

use crate::errors::ModelError;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_SHORT_LEN: usize = 300;

pub fn required(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    optional(field, Some(value), max)
}

pub fn optional(field: &str, value: Option<&str>, max: usize) -> Result<(), ModelError> {
    match value {
        Some(v) if v.chars().count() > max => {
            Err(ModelError::Validation(format!("{field} must be at most {max} characters")))
        }
        _ => Ok(()),
    }
}

/// Empty strings from HTML forms mean "no value".
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
