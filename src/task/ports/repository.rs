//! Repository port for task persistence and lookup.

use crate::persistence::PersistenceFailure;
use crate::project::domain::ProjectId;
use crate::task::domain::{IssueNumber, Task, TaskDomainError, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists or [`TaskRepositoryError::DuplicateIssue`] when the issue number
    /// is already bound to another task in the same project.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (status, completion, title).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by internal task identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds the task bound to an issue number within a project.
    ///
    /// Returns `None` when no task is bound to the issue.
    async fn find_by_issue(
        &self,
        project_id: ProjectId,
        issue_number: IssueNumber,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks of a project ordered by creation time.
    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// Another task in the project is already bound to the issue.
    #[error("issue #{issue_number} is already bound in project {project_id}")]
    DuplicateIssue {
        /// Project owning both tasks.
        project_id: ProjectId,
        /// Conflicting issue number.
        issue_number: IssueNumber,
    },

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A stored row could not be turned back into a valid task.
    #[error("corrupt task record: {0}")]
    Corrupt(#[from] TaskDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl PersistenceFailure for TaskRepositoryError {
    fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}
