//! Error classification shared by every service boundary.
//!
//! Each service returns its own `thiserror` enum. Those enums implement
//! [`Classify`] so callers can map any failure onto one closed set of
//! [`ErrorKind`]s, and from there onto a transport status through the single
//! table in [`ErrorKind::status_code`].

use serde::Serialize;
use std::fmt;

/// Closed set of failure classes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed request shape.
    Validation,
    /// Illegal state transition or invalid field value.
    Domain,
    /// Missing or bad webhook signature.
    Authenticity,
    /// Missing project, missing issue number, unknown status literal.
    Precondition,
    /// The external issue tracker failed; retry against it.
    Integration,
    /// Anything else. Logged in full, surfaced opaquely.
    Internal,
}

impl ErrorKind {
    /// Returns the HTTP status code for this kind.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::Validation | Self::Domain | Self::Precondition => 400,
            Self::Authenticity => 401,
            Self::Integration => 502,
            Self::Internal => 500,
        }
    }

    /// Returns the stable name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Domain => "domain",
            Self::Authenticity => "authenticity",
            Self::Precondition => "precondition",
            Self::Integration => "integration",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that know which [`ErrorKind`] they belong to.
pub trait Classify {
    /// Returns the failure class of this error.
    fn kind(&self) -> ErrorKind;
}

/// Message returned in place of internal error details.
pub const OPAQUE_INTERNAL_MESSAGE: &str = "An unexpected error occurred.";

/// Boundary representation of a failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Failure class.
    pub kind: ErrorKind,
    /// Transport status code.
    pub status: u16,
    /// Caller-facing message.
    pub message: String,
}

impl Rejection {
    /// Builds a rejection from a classified error.
    ///
    /// Internal errors are logged with their full detail and replaced by an
    /// opaque message.
    pub fn from_error<E>(error: &E) -> Self
    where
        E: Classify + std::error::Error,
    {
        let kind = error.kind();
        let message = if kind == ErrorKind::Internal {
            tracing::error!(error = %error, source = ?error.source(), "unhandled internal error");
            OPAQUE_INTERNAL_MESSAGE.to_owned()
        } else {
            error.to_string()
        };

        Self {
            kind,
            status: kind.status_code(),
            message,
        }
    }
}
