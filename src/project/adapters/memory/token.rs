//! Token protector that stores credentials unchanged.

use secrecy::{ExposeSecret, SecretString};

use crate::project::{
    domain::ProtectedToken,
    ports::{TokenProtectionError, TokenProtector},
};

/// Keeps tokens in their plaintext form.
///
/// Only suitable for tests and local development.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTokenProtector;

impl TokenProtector for PassthroughTokenProtector {
    fn protect(&self, plaintext: &SecretString) -> Result<ProtectedToken, TokenProtectionError> {
        ProtectedToken::new(plaintext.expose_secret())
            .map_err(|err| TokenProtectionError(err.to_string()))
    }

    fn unprotect(&self, protected: &ProtectedToken) -> Result<SecretString, TokenProtectionError> {
        Ok(SecretString::from(protected.as_str()))
    }
}
