//! Identifier and validated scalar types for the project domain.

use super::error::{ProjectDomainError, required_field};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Creates a new random project identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a project identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner and name of the external repository a project mirrors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryCoordinates {
    owner: String,
    name: String,
}

impl RepositoryCoordinates {
    /// Maximum length of each coordinate in characters.
    pub const MAX_SEGMENT_LENGTH: usize = 100;

    /// Creates validated repository coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError`] when either segment is blank or longer
    /// than [`RepositoryCoordinates::MAX_SEGMENT_LENGTH`].
    pub fn new(owner: &str, name: &str) -> Result<Self, ProjectDomainError> {
        Ok(Self {
            owner: required_field(owner, "repository owner", Self::MAX_SEGMENT_LENGTH)?,
            name: required_field(name, "repository name", Self::MAX_SEGMENT_LENGTH)?,
        })
    }

    /// Returns the repository owner login.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepositoryCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Credential blob produced by the token protector.
///
/// The value is ciphertext; it is never decrypted by the domain.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtectedToken(String);

impl ProtectedToken {
    /// Wraps protected credential bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::MissingField`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ProjectDomainError::MissingField {
                field: "protected token",
            });
        }
        Ok(Self(raw))
    }

    /// Returns the protected form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProtectedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProtectedToken(..)")
    }
}
