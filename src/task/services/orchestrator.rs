//! Outbound synchronization: drives issue tracker side effects for local task
//! operations.
//!
//! Every operation performs its remote side effect before committing local
//! state. When the local commit fails after an issue was created, the issue is
//! closed again as compensation.

use crate::error::{Classify, ErrorKind};
use crate::project::{
    domain::{Project, ProjectId, RepositoryCoordinates},
    ports::{ProjectRepository, ProjectRepositoryError, TokenProtectionError, TokenProtector},
};
use crate::task::{
    domain::{
        IssueDraft, IssueNumber, ParseTaskStatusError, Task, TaskDomainError, TaskId,
        TaskIssueComments, TaskIssueDetails, TaskStatus, TaskTitle,
    },
    ports::{
        IssueTrackerClient, IssueTrackerError, RealtimeNotifier, TaskRepository,
        TaskRepositoryError, TaskUpdatedEvent, UpdateSource,
    },
};
use mockable::Clock;
use secrecy::SecretString;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Maximum issue description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 20_000;

/// Request payload for creating a task and its mirrored issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
        }
    }

    /// Sets the issue description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for changing a task status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskStatusRequest {
    task_id: TaskId,
    status: String,
}

impl UpdateTaskStatusRequest {
    /// Creates a status change request; `status` is parsed case-insensitively.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
        }
    }
}

/// Service-level errors for outbound task operations.
#[derive(Debug, Error)]
pub enum TaskOrchestrationError {
    /// The request is malformed.
    #[error("invalid request: {0}")]
    InvalidInput(String),

    /// Domain validation or state transition failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The requested status literal is unknown.
    #[error(transparent)]
    UnknownStatus(#[from] ParseTaskStatusError),

    /// The owning project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The task has no mirrored issue.
    #[error("task {0} does not have an associated issue")]
    MissingIssueNumber(TaskId),

    /// The issue tracker call failed.
    #[error(transparent)]
    Integration(#[from] IssueTrackerError),

    /// The project credential could not be unprotected.
    #[error(transparent)]
    Credential(#[from] TokenProtectionError),

    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Project lookup failed.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),

    /// The detached commit phase did not run to completion.
    #[error("task commit aborted: {0}")]
    CommitAborted(String),
}

impl Classify for TaskOrchestrationError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::Validation,
            Self::Domain(_) => ErrorKind::Domain,
            Self::UnknownStatus(_) | Self::ProjectNotFound(_) | Self::MissingIssueNumber(_) => {
                ErrorKind::Precondition
            }
            Self::Integration(_) => ErrorKind::Integration,
            Self::Credential(_)
            | Self::Repository(_)
            | Self::ProjectRepository(_)
            | Self::CommitAborted(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for outbound task operations.
pub type TaskOrchestrationResult<T> = Result<T, TaskOrchestrationError>;

/// Remote side effect required before a local status move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RemoteAction {
    Close,
    Reopen,
}

impl RemoteAction {
    const fn required_for(current: TaskStatus, requested: TaskStatus) -> Option<Self> {
        match (current, requested) {
            (TaskStatus::Done, TaskStatus::Done) => None,
            (_, TaskStatus::Done) => Some(Self::Close),
            (TaskStatus::Done, TaskStatus::InProgress) => Some(Self::Reopen),
            _ => None,
        }
    }
}

/// Port bundle used by [`TaskOrchestrator`].
pub struct OrchestratorPorts<R, P, I, K, N> {
    /// Task persistence.
    pub tasks: Arc<R>,
    /// Project lookup.
    pub projects: Arc<P>,
    /// Remote issue tracker.
    pub issue_tracker: Arc<I>,
    /// Credential unprotection.
    pub token_protector: Arc<K>,
    /// Realtime fan-out.
    pub notifier: Arc<N>,
}

/// Outbound synchronization service.
pub struct TaskOrchestrator<R, P, I, K, N, C>
where
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    projects: Arc<P>,
    issue_tracker: Arc<I>,
    token_protector: Arc<K>,
    notifier: Arc<N>,
    clock: Arc<C>,
}

impl<R, P, I, K, N, C> Clone for TaskOrchestrator<R, P, I, K, N, C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            projects: Arc::clone(&self.projects),
            issue_tracker: Arc::clone(&self.issue_tracker),
            token_protector: Arc::clone(&self.token_protector),
            notifier: Arc::clone(&self.notifier),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, P, I, K, N, C> TaskOrchestrator<R, P, I, K, N, C>
where
    R: TaskRepository + 'static,
    P: ProjectRepository,
    I: IssueTrackerClient + 'static,
    K: TokenProtector,
    N: RealtimeNotifier,
    C: Clock + Send + Sync,
{
    /// Creates a new orchestrator.
    #[must_use]
    pub fn new(ports: OrchestratorPorts<R, P, I, K, N>, clock: Arc<C>) -> Self {
        Self {
            tasks: ports.tasks,
            projects: ports.projects,
            issue_tracker: ports.issue_tracker,
            token_protector: ports.token_protector,
            notifier: ports.notifier,
            clock,
        }
    }

    /// Creates a remote issue, then persists a task bound to it.
    ///
    /// The persist phase runs on a detached task: dropping the returned
    /// future after the issue was created still completes the commit, or the
    /// compensating close when the commit fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrchestrationError`] when validation fails, the project
    /// is missing, the tracker rejects the creation, or persistence fails.
    /// A persistence failure is returned even when compensation succeeded.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskOrchestrationResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let description = validate_description(request.description)?;
        let project = self.load_project(request.project_id).await?;
        let credential = self.token_protector.unprotect(project.token())?;

        let draft = IssueDraft::new(title.clone(), description);
        let issue_number = self
            .issue_tracker
            .create_issue(project.repository(), &draft, &credential)
            .await?;
        info!(
            project_id = %project.id(),
            repository = %project.repository(),
            issue_number = %issue_number,
            "created remote issue for new task"
        );

        let mut task = Task::new(project.id(), title, &*self.clock);
        task.bind_issue(issue_number)?;

        self.commit_created(task, project.repository().clone(), issue_number, credential)
            .await
    }

    async fn commit_created(
        &self,
        task: Task,
        repository: RepositoryCoordinates,
        issue_number: IssueNumber,
        credential: SecretString,
    ) -> TaskOrchestrationResult<Task> {
        let tasks = Arc::clone(&self.tasks);
        let issue_tracker = Arc::clone(&self.issue_tracker);
        let aborted_repository = repository.clone();

        let commit = tokio::spawn(async move {
            let Err(store_error) = tasks.store(&task).await else {
                return Ok(task);
            };
            error!(
                issue_number = %issue_number,
                repository = %repository,
                error = %store_error,
                "failed to persist task after creating remote issue"
            );
            compensate_created_issue(&*issue_tracker, &repository, issue_number, &credential)
                .await;
            Err(TaskOrchestrationError::Repository(store_error))
        });

        commit.await.map_err(|err| {
            error!(
                issue_number = %issue_number,
                repository = %aborted_repository,
                error = %err,
                "task commit aborted after creating remote issue; issue left open"
            );
            TaskOrchestrationError::CommitAborted(err.to_string())
        })?
    }

    /// Moves a task to the requested status, closing or reopening its issue
    /// first when the move crosses the done boundary.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrchestrationError`] when the status is unknown, the
    /// remote call fails (the task is then left untouched), the transition is
    /// illegal, or persistence fails.
    pub async fn update_status(
        &self,
        request: UpdateTaskStatusRequest,
    ) -> TaskOrchestrationResult<Option<Task>> {
        let Some(mut task) = self.tasks.find_by_id(request.task_id).await? else {
            return Ok(None);
        };
        let requested = TaskStatus::try_from(request.status.as_str())?;

        let remote_action = RemoteAction::required_for(task.status(), requested);
        if let Some(action) = remote_action {
            self.apply_remote_action(&task, action).await?;
        }

        let changed = task.move_locally(requested, &*self.clock)?;
        if changed {
            if let Err(update_error) = self.tasks.update(&task).await {
                if let Some(applied) = remote_action {
                    error!(
                        task_id = %task.id(),
                        issue_number = ?task.issue_number().map(IssueNumber::value),
                        action = ?applied,
                        error = %update_error,
                        "remote issue updated but local task persist failed"
                    );
                }
                return Err(update_error.into());
            }
            self.notify(&task).await;
        }
        Ok(Some(task))
    }

    async fn apply_remote_action(
        &self,
        task: &Task,
        action: RemoteAction,
    ) -> TaskOrchestrationResult<()> {
        let project = self.load_project(task.project_id()).await?;
        let issue_number = task
            .issue_number()
            .ok_or(TaskOrchestrationError::MissingIssueNumber(task.id()))?;
        let credential = self.token_protector.unprotect(project.token())?;

        match action {
            RemoteAction::Close => {
                self.issue_tracker
                    .close_issue(project.repository(), issue_number, &credential)
                    .await?;
            }
            RemoteAction::Reopen => {
                self.issue_tracker
                    .reopen_issue(project.repository(), issue_number, &credential)
                    .await?;
            }
        }
        info!(task_id = %task.id(), issue_number = %issue_number, ?action, "applied remote issue action");
        Ok(())
    }

    async fn notify(&self, task: &Task) {
        let event = TaskUpdatedEvent::from_task(task, UpdateSource::Local);
        if let Err(err) = self.notifier.notify_task_updated(event).await {
            warn!(task_id = %task.id(), error = %err, "failed to publish local task update");
        }
    }

    /// Reads the mirrored issue of a task.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrchestrationError::MissingIssueNumber`] when the task
    /// has no issue, or the tracker error when the read fails.
    pub async fn issue_details(
        &self,
        task_id: TaskId,
    ) -> TaskOrchestrationResult<Option<TaskIssueDetails>> {
        let Some((task, project, issue_number)) = self.load_issue_context(task_id).await? else {
            return Ok(None);
        };
        let credential = self.token_protector.unprotect(project.token())?;
        let details = self
            .issue_tracker
            .issue_details(project.repository(), issue_number, &credential)
            .await?;
        Ok(Some(TaskIssueDetails {
            task_id: task.id(),
            details,
        }))
    }

    /// Reads the comments on the mirrored issue of a task.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrchestrationError::MissingIssueNumber`] when the task
    /// has no issue, or the tracker error when the read fails.
    pub async fn issue_comments(
        &self,
        task_id: TaskId,
    ) -> TaskOrchestrationResult<Option<TaskIssueComments>> {
        let Some((task, project, issue_number)) = self.load_issue_context(task_id).await? else {
            return Ok(None);
        };
        let credential = self.token_protector.unprotect(project.token())?;
        let comments = self
            .issue_tracker
            .issue_comments(project.repository(), issue_number, &credential)
            .await?;
        Ok(Some(TaskIssueComments {
            task_id: task.id(),
            comments,
        }))
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrchestrationError::Repository`] when lookup fails.
    pub async fn find_task(&self, task_id: TaskId) -> TaskOrchestrationResult<Option<Task>> {
        Ok(self.tasks.find_by_id(task_id).await?)
    }

    /// Lists the tasks of a project in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrchestrationError::Repository`] when lookup fails.
    pub async fn list_project_tasks(
        &self,
        project_id: ProjectId,
    ) -> TaskOrchestrationResult<Vec<Task>> {
        Ok(self.tasks.list_by_project(project_id).await?)
    }

    async fn load_project(&self, project_id: ProjectId) -> TaskOrchestrationResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(TaskOrchestrationError::ProjectNotFound(project_id))
    }

    async fn load_issue_context(
        &self,
        task_id: TaskId,
    ) -> TaskOrchestrationResult<Option<(Task, Project, IssueNumber)>> {
        let Some(task) = self.tasks.find_by_id(task_id).await? else {
            return Ok(None);
        };
        let issue_number = task
            .issue_number()
            .ok_or(TaskOrchestrationError::MissingIssueNumber(task.id()))?;
        let project = self.load_project(task.project_id()).await?;
        Ok(Some((task, project, issue_number)))
    }
}

fn validate_description(description: Option<String>) -> TaskOrchestrationResult<Option<String>> {
    match description {
        Some(value) if value.chars().count() > MAX_DESCRIPTION_LENGTH => {
            Err(TaskOrchestrationError::InvalidInput(format!(
                "description must be {MAX_DESCRIPTION_LENGTH} characters or fewer"
            )))
        }
        other => Ok(other),
    }
}

/// Closes an issue whose task could not be persisted. Failures are logged
/// only; the caller reports the original persistence error.
async fn compensate_created_issue<I>(
    issue_tracker: &I,
    repository: &RepositoryCoordinates,
    issue_number: IssueNumber,
    credential: &SecretString,
) where
    I: IssueTrackerClient + ?Sized,
{
    match issue_tracker
        .close_issue(repository, issue_number, credential)
        .await
    {
        Ok(()) => warn!(
            issue_number = %issue_number,
            repository = %repository,
            "closed orphaned issue after task persistence failure"
        ),
        Err(err) => error!(
            issue_number = %issue_number,
            repository = %repository,
            error = %err,
            "compensating close failed after task persistence failure"
        ),
    }
}
