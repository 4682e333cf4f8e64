//! Registration and lookup of projects.

use crate::error::{Classify, ErrorKind};
use crate::project::{
    domain::{Project, ProjectDomainError, ProjectId, RepositoryCoordinates},
    ports::{ProjectRepository, ProjectRepositoryError, TokenProtectionError, TokenProtector},
};
use mockable::Clock;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Maximum plaintext token length in characters.
pub const MAX_TOKEN_LENGTH: usize = 4_000;

/// Request payload for registering a project.
#[derive(Debug, Clone)]
pub struct CreateProjectRequest {
    name: String,
    owner: String,
    repository: String,
    token: SecretString,
}

impl CreateProjectRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        repository: impl Into<String>,
        token: SecretString,
    ) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            repository: repository.into(),
            token,
        }
    }
}

/// Errors returned by [`ProjectRegistry`].
#[derive(Debug, Error)]
pub enum ProjectRegistryError {
    /// The plaintext token is blank or too long.
    #[error("invalid request: {0}")]
    InvalidInput(String),

    /// A project field failed validation.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// The token could not be protected.
    #[error(transparent)]
    Credential(#[from] TokenProtectionError),

    /// Project persistence failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
}

impl Classify for ProjectRegistryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::Validation,
            Self::Domain(_) => ErrorKind::Domain,
            Self::Credential(_) | Self::Repository(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for project registry operations.
pub type ProjectRegistryResult<T> = Result<T, ProjectRegistryError>;

/// Registers projects and protects their credentials before storage.
pub struct ProjectRegistry<R, K, C>
where
    R: ProjectRepository,
    K: TokenProtector,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    token_protector: Arc<K>,
    clock: Arc<C>,
}

impl<R, K, C> ProjectRegistry<R, K, C>
where
    R: ProjectRepository,
    K: TokenProtector,
    C: Clock + Send + Sync,
{
    /// Creates a new registry.
    #[must_use]
    pub const fn new(repository: Arc<R>, token_protector: Arc<K>, clock: Arc<C>) -> Self {
        Self {
            repository,
            token_protector,
            clock,
        }
    }

    /// Validates and stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError`] when a field is invalid, the token
    /// cannot be protected, or persistence fails.
    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> ProjectRegistryResult<Project> {
        validate_token(&request.token)?;
        let repository = RepositoryCoordinates::new(&request.owner, &request.repository)?;
        let token = self.token_protector.protect(&request.token)?;
        let project = Project::new(&request.name, repository, token, &*self.clock)?;

        self.repository.store(&project).await?;
        info!(
            project_id = %project.id(),
            repository = %project.repository(),
            "registered project"
        );
        Ok(project)
    }

    /// Retrieves a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Repository`] when lookup fails.
    pub async fn find_project(&self, id: ProjectId) -> ProjectRegistryResult<Option<Project>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists all projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Repository`] when lookup fails.
    pub async fn list_projects(&self) -> ProjectRegistryResult<Vec<Project>> {
        Ok(self.repository.list().await?)
    }
}

fn validate_token(token: &SecretString) -> ProjectRegistryResult<()> {
    let plaintext = token.expose_secret().trim();
    if plaintext.is_empty() {
        return Err(ProjectRegistryError::InvalidInput(
            "token is required".to_owned(),
        ));
    }
    if plaintext.chars().count() > MAX_TOKEN_LENGTH {
        return Err(ProjectRegistryError::InvalidInput(format!(
            "token must be {MAX_TOKEN_LENGTH} characters or fewer"
        )));
    }
    Ok(())
}
