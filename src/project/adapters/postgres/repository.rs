//! `PostgreSQL` repository implementation for project storage.

use super::{
    models::{NewProjectRow, ProjectRow},
    schema::projects,
};
use crate::persistence::{PgPool, run_blocking};
use crate::project::{
    domain::{PersistedProjectData, Project, ProjectId, ProtectedToken, RepositoryCoordinates},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let new_row = to_new_row(project);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    other => ProjectRepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        run_blocking(&self.pool, move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn find_by_repository(
        &self,
        repository: &RepositoryCoordinates,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let owner = repository.owner().to_owned();
        let name = repository.name().to_owned();
        run_blocking(&self.pool, move |connection| {
            projects::table
                .filter(projects::repo_owner.eq(owner))
                .filter(projects::repo_name.eq(name))
                .order((projects::created_at.asc(), projects::id.asc()))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?
                .into_iter()
                .map(row_to_project)
                .collect()
        })
        .await
    }

    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        run_blocking(&self.pool, move |connection| {
            projects::table
                .order(projects::created_at.desc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?
                .into_iter()
                .map(row_to_project)
                .collect()
        })
        .await
    }
}

fn to_new_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().to_owned(),
        repo_owner: project.repository().owner().to_owned(),
        repo_name: project.repository().name().to_owned(),
        protected_token: project.token().as_str().to_owned(),
        created_at: project.created_at(),
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let repository = RepositoryCoordinates::new(&row.repo_owner, &row.repo_name)
        .map_err(ProjectRepositoryError::persistence)?;
    let token =
        ProtectedToken::new(row.protected_token).map_err(ProjectRepositoryError::persistence)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name: row.name,
        repository,
        token,
        created_at: row.created_at,
    }))
}
