//! Error types for webhook input validation.

use crate::project::domain::ProjectDomainError;
use thiserror::Error;

/// Errors returned while validating delivery metadata.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WebhookDomainError {
    /// A required header value is blank.
    #[error("missing required webhook header: {field}")]
    MissingField {
        /// Name of the rejected field.
        field: &'static str,
    },

    /// A header value exceeds its maximum length.
    #[error("{field} must be {max} characters or fewer")]
    FieldTooLong {
        /// Name of the rejected field.
        field: &'static str,
        /// Maximum permitted length in characters.
        max: usize,
    },
}

/// Errors returned while parsing an `issues` event body.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WebhookPayloadError {
    /// The body is not valid JSON of the expected shape.
    #[error("invalid webhook payload: {0}")]
    Malformed(String),

    /// The `issue` object is absent.
    #[error("webhook payload is missing issue data")]
    MissingIssue,

    /// The `repository` object or its owner is absent.
    #[error("webhook payload is missing repository data")]
    MissingRepository,

    /// Repository owner or name is blank or too long.
    #[error("webhook payload contains invalid repository values: {0}")]
    InvalidRepository(#[source] ProjectDomainError),

    /// The issue number is zero or negative.
    #[error("webhook payload contains invalid issue number: {0}")]
    InvalidIssueNumber(i64),
}
