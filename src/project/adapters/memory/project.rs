//! In-memory repository for project tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use crate::project::{
    domain::{Project, ProjectId, RepositoryCoordinates},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ProjectRepositoryResult<RwLockReadGuard<'_, HashMap<ProjectId, Project>>> {
        self.projects.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut projects = self.projects.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn find_by_repository(
        &self,
        repository: &RepositoryCoordinates,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let mut matches: Vec<Project> = self
            .read()?
            .values()
            .filter(|project| project.repository() == repository)
            .cloned()
            .collect();
        matches.sort_by_key(|project| (project.created_at(), project.id().into_inner()));
        Ok(matches)
    }

    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let mut projects: Vec<Project> = self.read()?.values().cloned().collect();
        projects.sort_by_key(|project| std::cmp::Reverse(project.created_at()));
        Ok(projects)
    }
}
