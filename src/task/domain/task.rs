//! Task aggregate root and its status state machine.

use super::{IssueNumber, ParseTaskStatusError, TaskDomainError, TaskId, TaskTitle};
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Todo,
    /// Task is being worked on.
    InProgress,
    /// Task has been completed.
    Done,
}

impl TaskStatus {
    /// Returns the canonical representation used in storage and
    /// notifications.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
        }
    }

    /// Returns `true` for statuses reachable through explicit moves.
    #[must_use]
    pub const fn is_move_target(self) -> bool {
        matches!(self, Self::InProgress | Self::Done)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "inprogress" | "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task aggregate root.
///
/// A task in [`TaskStatus::Done`] always carries a completion time and a task
/// in any other status never does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    status: TaskStatus,
    issue_number: Option<IssueNumber>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project identifier.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted external issue number, if bound.
    pub issue_number: Option<IssueNumber>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task in [`TaskStatus::Todo`].
    #[must_use]
    pub fn new(project_id: ProjectId, title: TaskTitle, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            project_id,
            title,
            status: TaskStatus::Todo,
            issue_number: None,
            created_at: clock.utc(),
            completed_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InconsistentCompletion`] when the completion
    /// timestamp does not match the persisted status.
    pub fn try_from_persisted(data: PersistedTaskData) -> Result<Self, TaskDomainError> {
        let is_done = data.status == TaskStatus::Done;
        if is_done != data.completed_at.is_some() {
            return Err(TaskDomainError::InconsistentCompletion {
                task_id: data.id,
                status: data.status,
            });
        }

        Ok(Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            status: data.status,
            issue_number: data.issue_number,
            created_at: data.created_at,
            completed_at: data.completed_at,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the bound external issue number, if any.
    #[must_use]
    pub const fn issue_number(&self) -> Option<IssueNumber> {
        self.issue_number
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, present only while done.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Binds the task to an external issue.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::IssueAlreadyBound`] if an issue number is
    /// already set.
    pub const fn bind_issue(&mut self, issue_number: IssueNumber) -> Result<(), TaskDomainError> {
        if let Some(existing) = self.issue_number {
            return Err(TaskDomainError::IssueAlreadyBound {
                task_id: self.id,
                existing,
            });
        }
        self.issue_number = Some(issue_number);
        Ok(())
    }

    /// Moves the task through the local path, stamping completion with the
    /// clock time.
    ///
    /// Returns `false` when the task is already in `new_status`.
    ///
    /// # Errors
    ///
    /// See [`Task::move_locally_at`].
    pub fn move_locally(
        &mut self,
        new_status: TaskStatus,
        clock: &impl Clock,
    ) -> Result<bool, TaskDomainError> {
        self.move_locally_at(new_status, clock.utc())
    }

    /// Moves the task through the local path with an explicit completion
    /// time, used only when entering [`TaskStatus::Done`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when a done task
    /// is moved anywhere but [`TaskStatus::InProgress`], and
    /// [`TaskDomainError::UnsupportedTargetStatus`] when `new_status` is
    /// [`TaskStatus::Todo`].
    pub fn move_locally_at(
        &mut self,
        new_status: TaskStatus,
        completed_at: DateTime<Utc>,
    ) -> Result<bool, TaskDomainError> {
        if self.status == new_status {
            return Ok(false);
        }

        if self.status == TaskStatus::Done && new_status != TaskStatus::InProgress {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: new_status,
            });
        }

        self.ensure_move_target(new_status)?;
        self.set_status(new_status, completed_at);
        Ok(true)
    }

    /// Applies a status reported by the external tracker.
    ///
    /// Always reports a change, even when the status already matches, so a
    /// repeated remote close refreshes the completion time.
    ///
    /// # Errors
    ///
    /// See [`Task::apply_external_status_at`].
    pub fn apply_external_status(
        &mut self,
        new_status: TaskStatus,
        clock: &impl Clock,
    ) -> Result<bool, TaskDomainError> {
        self.apply_external_status_at(new_status, clock.utc())
    }

    /// Applies a remote status with an explicit completion time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnsupportedTargetStatus`] when `new_status`
    /// is [`TaskStatus::Todo`].
    pub fn apply_external_status_at(
        &mut self,
        new_status: TaskStatus,
        completed_at: DateTime<Utc>,
    ) -> Result<bool, TaskDomainError> {
        self.ensure_move_target(new_status)?;
        self.set_status(new_status, completed_at);
        Ok(true)
    }

    /// Overwrites the title with one reported by the external tracker.
    pub fn sync_title(&mut self, title: TaskTitle) {
        self.title = title;
    }

    /// Renames the task through the local path.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DoneTaskLocked`] when the task is done.
    pub fn rename(&mut self, title: TaskTitle) -> Result<(), TaskDomainError> {
        if self.status == TaskStatus::Done {
            return Err(TaskDomainError::DoneTaskLocked(self.id));
        }
        self.title = title;
        Ok(())
    }

    const fn ensure_move_target(&self, new_status: TaskStatus) -> Result<(), TaskDomainError> {
        if new_status.is_move_target() {
            Ok(())
        } else {
            Err(TaskDomainError::UnsupportedTargetStatus {
                task_id: self.id,
                to: new_status,
            })
        }
    }

    fn set_status(&mut self, new_status: TaskStatus, completed_at: DateTime<Utc>) {
        self.status = new_status;
        self.completed_at = (new_status == TaskStatus::Done).then_some(completed_at);
    }
}
