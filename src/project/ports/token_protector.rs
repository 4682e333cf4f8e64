//! Port for protecting integration credentials at rest.

use crate::project::domain::ProtectedToken;
use secrecy::SecretString;
use thiserror::Error;

/// Converts plaintext integration tokens to and from their stored form.
///
/// Implementations own the key material; callers only hold plaintext for the
/// duration of a single operation.
pub trait TokenProtector: Send + Sync {
    /// Protects a plaintext token for storage.
    ///
    /// # Errors
    ///
    /// Returns [`TokenProtectionError`] when protection fails.
    fn protect(&self, plaintext: &SecretString) -> Result<ProtectedToken, TokenProtectionError>;

    /// Recovers the plaintext token from its stored form.
    ///
    /// # Errors
    ///
    /// Returns [`TokenProtectionError`] when the blob cannot be unprotected.
    fn unprotect(&self, protected: &ProtectedToken) -> Result<SecretString, TokenProtectionError>;
}

/// Failure raised by a [`TokenProtector`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("token protection failed: {0}")]
pub struct TokenProtectionError(pub String);
