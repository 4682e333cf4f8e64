//! Port for pushing task changes to realtime observers.

use crate::project::domain::ProjectId;
use crate::task::domain::{Task, TaskId, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Origin of a task change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateSource {
    /// Change requested through the local task operations.
    Local,
    /// Change applied from an inbound webhook delivery.
    Webhook,
}

impl UpdateSource {
    /// Returns the source tag carried by notifications.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Webhook => "webhook",
        }
    }
}

/// Change notification for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdatedEvent {
    /// Changed task.
    pub task_id: TaskId,
    /// Project owning the task.
    pub project_id: ProjectId,
    /// Status after the change.
    pub status: TaskStatus,
    /// Completion time after the change.
    pub completed_at: Option<DateTime<Utc>>,
    /// Where the change originated.
    pub source: UpdateSource,
}

impl TaskUpdatedEvent {
    /// Captures the current state of a task.
    #[must_use]
    pub const fn from_task(task: &Task, source: UpdateSource) -> Self {
        Self {
            task_id: task.id(),
            project_id: task.project_id(),
            status: task.status(),
            completed_at: task.completed_at(),
            source,
        }
    }
}

/// Fan-out of task changes to interested observers.
#[async_trait]
pub trait RealtimeNotifier: Send + Sync {
    /// Publishes a task change.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] when the event could not be delivered.
    async fn notify_task_updated(&self, event: TaskUpdatedEvent) -> Result<(), NotifierError>;
}

/// Failure to publish a task change.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("realtime notification failed: {0}")]
pub struct NotifierError(pub String);
