//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::persistence::{PgPool, run_blocking};
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{IssueNumber, PersistedTaskData, Task, TaskId, TaskStatus, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

const ISSUE_UNIQUE_CONSTRAINT: &str = "idx_tasks_project_issue_unique";

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let project_id = task.project_id();
        let issue_number = task.issue_number();
        let new_row = to_new_row(task);

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match (err, issue_number) {
                    (
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info),
                        Some(number),
                    ) if is_issue_unique_violation(info.as_ref()) => {
                        TaskRepositoryError::DuplicateIssue {
                            project_id,
                            issue_number: number,
                        }
                    }
                    (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    (other, _) => TaskRepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let updated = task.clone();
        run_blocking(&self.pool, move |connection| update_task_row(connection, &updated)).await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_issue(
        &self,
        project_id: ProjectId,
        issue_number: IssueNumber,
    ) -> TaskRepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let row = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .filter(tasks::issue_number.eq(issue_number.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        run_blocking(&self.pool, move |connection| {
            tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }
}

/// Writes the mutable columns of an existing task on the given connection.
///
/// Callers may run this inside a wider transaction.
pub(crate) fn update_task_row(
    connection: &mut PgConnection,
    task: &Task,
) -> TaskRepositoryResult<()> {
    let affected = diesel::update(tasks::table.filter(tasks::id.eq(task.id().into_inner())))
        .set(&to_changeset(task))
        .execute(connection)
        .map_err(TaskRepositoryError::persistence)?;
    if affected == 0 {
        return Err(TaskRepositoryError::NotFound(task.id()));
    }
    Ok(())
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        title: task.title().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        issue_number: task.issue_number().map(IssueNumber::value),
        created_at: task.created_at(),
        completed_at: task.completed_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        issue_number: task.issue_number().map(IssueNumber::value),
        completed_at: task.completed_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        project_id,
        title,
        status,
        issue_number,
        created_at,
        completed_at,
    } = row;

    let status = TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        project_id: ProjectId::from_uuid(project_id),
        title: TaskTitle::new(title)?,
        status,
        issue_number: issue_number.map(IssueNumber::new).transpose()?,
        created_at,
        completed_at,
    };
    Ok(Task::try_from_persisted(data)?)
}

fn is_issue_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == ISSUE_UNIQUE_CONSTRAINT)
}
