//! Error types for project domain validation.

use thiserror::Error;

/// Errors returned while constructing project values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// A required field is blank after trimming.
    #[error("{field} is required")]
    MissingField {
        /// Name of the rejected field.
        field: &'static str,
    },

    /// A field exceeds its maximum length.
    #[error("{field} must be {max} characters or fewer")]
    FieldTooLong {
        /// Name of the rejected field.
        field: &'static str,
        /// Maximum permitted length in characters.
        max: usize,
    },
}

/// Validates a required text field, returning its trimmed form.
pub(crate) fn required_field(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<String, ProjectDomainError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(ProjectDomainError::MissingField { field });
    }
    if normalized.chars().count() > max {
        return Err(ProjectDomainError::FieldTooLong { field, max });
    }
    Ok(normalized.to_owned())
}
