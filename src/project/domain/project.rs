//! Project aggregate root.

use super::error::{ProjectDomainError, required_field};
use super::{ProjectId, ProtectedToken, RepositoryCoordinates};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project mirroring one external repository.
///
/// Tasks reference their project by [`ProjectId`]; the project never holds
/// its tasks in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    repository: RepositoryCoordinates,
    token: ProtectedToken,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted display name.
    pub name: String,
    /// Persisted repository coordinates.
    pub repository: RepositoryCoordinates,
    /// Persisted protected credential.
    pub token: ProtectedToken,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Maximum display name length in characters.
    pub const MAX_NAME_LENGTH: usize = 150;

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError`] when the name is blank or too long.
    pub fn new(
        name: &str,
        repository: RepositoryCoordinates,
        token: ProtectedToken,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        Ok(Self {
            id: ProjectId::new(),
            name: required_field(name, "name", Self::MAX_NAME_LENGTH)?,
            repository,
            token,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            repository: data.repository,
            token: data.token,
            created_at: data.created_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the mirrored repository coordinates.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryCoordinates {
        &self.repository
    }

    /// Returns the protected credential.
    #[must_use]
    pub const fn token(&self) -> &ProtectedToken {
        &self.token
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
