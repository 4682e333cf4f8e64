//! HMAC-SHA256 authentication of webhook bodies.

use crate::config::SyncConfig;
use crate::error::{Classify, ErrorKind};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Prefix of the signature header value.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Signature validation failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// No shared secret is configured.
    #[error("webhook secret is not configured")]
    MissingSecret,

    /// The shared secret cannot key the MAC.
    #[error("webhook secret is unusable")]
    UnusableSecret,

    /// The signature header is absent or blank.
    #[error("missing webhook signature")]
    MissingSignature,

    /// The signature header lacks the `sha256=` prefix.
    #[error("invalid webhook signature format")]
    MalformedSignature,

    /// The digest does not match the body.
    #[error("webhook signature validation failed")]
    Mismatch,
}

impl Classify for SignatureError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingSecret | Self::UnusableSecret => ErrorKind::Internal,
            Self::MissingSignature | Self::MalformedSignature | Self::Mismatch => {
                ErrorKind::Authenticity
            }
        }
    }
}

/// Verifies `sha256=` signatures against a shared secret.
///
/// Fails closed when no secret is configured.
#[derive(Debug, Clone)]
pub struct SignatureValidator {
    secret: Option<SecretString>,
}

impl SignatureValidator {
    /// Creates a validator; `None` rejects every delivery.
    #[must_use]
    pub const fn new(secret: Option<SecretString>) -> Self {
        Self { secret }
    }

    /// Creates a validator from loaded configuration.
    #[must_use]
    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.webhook_secret().cloned())
    }

    /// Validates `signature` against the raw body.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::MissingSecret`] when unconfigured, and an
    /// authenticity variant when the header is absent, malformed or wrong.
    pub fn validate(&self, payload: &[u8], signature: Option<&str>) -> Result<(), SignatureError> {
        let secret = self
            .secret
            .as_ref()
            .filter(|secret| !secret.expose_secret().trim().is_empty())
            .ok_or(SignatureError::MissingSecret)?;

        let header = signature
            .filter(|value| !value.trim().is_empty())
            .ok_or(SignatureError::MissingSignature)?;
        let provided = strip_prefix(header).ok_or(SignatureError::MalformedSignature)?;

        let expected = compute_digest(secret, payload)?;
        if bool::from(expected.as_bytes().ct_eq(provided.as_bytes())) {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }
}

fn strip_prefix(header: &str) -> Option<&str> {
    let prefix = header.get(..SIGNATURE_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(SIGNATURE_PREFIX) {
        return None;
    }
    header.get(SIGNATURE_PREFIX.len()..)
}

fn compute_digest(secret: &SecretString, payload: &[u8]) -> Result<String, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .map_err(|_| SignatureError::UnusableSecret)?;
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Renders the signature header value a sender would attach to `payload`.
///
/// # Errors
///
/// Returns [`SignatureError::UnusableSecret`] when the secret cannot key the
/// MAC.
pub fn sign_payload(secret: &SecretString, payload: &[u8]) -> Result<String, SignatureError> {
    compute_digest(secret, payload).map(|digest| format!("{SIGNATURE_PREFIX}{digest}"))
}
