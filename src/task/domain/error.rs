//! Error types for task domain validation and state transitions.

use super::{IssueNumber, TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the maximum length.
    #[error("task title must be {max} characters or fewer, got {length}")]
    TitleTooLong {
        /// Length of the rejected title in characters.
        length: usize,
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// The issue number is invalid.
    #[error("invalid issue number {0}, expected a positive integer")]
    InvalidIssueNumber(i64),

    /// The task is already bound to an external issue.
    #[error("task {task_id} is already bound to issue #{existing}")]
    IssueAlreadyBound {
        /// Task that rejected the binding.
        task_id: TaskId,
        /// Issue number bound previously.
        existing: IssueNumber,
    },

    /// Done tasks may only move back to in progress.
    #[error("task {task_id} is done and cannot move to {to}")]
    InvalidStatusTransition {
        /// Task that rejected the transition.
        task_id: TaskId,
        /// Status before the attempted transition.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The requested status is not a valid transition target.
    #[error("task {task_id} cannot be moved to {to}")]
    UnsupportedTargetStatus {
        /// Task that rejected the transition.
        task_id: TaskId,
        /// Requested status.
        to: TaskStatus,
    },

    /// Done tasks cannot be edited through the local path.
    #[error("task {0} is done and cannot be edited")]
    DoneTaskLocked(TaskId),

    /// Persisted completion data contradicts the persisted status.
    #[error("task {task_id} has status {status} but completion time presence is inconsistent")]
    InconsistentCompletion {
        /// Task whose persisted data is inconsistent.
        task_id: TaskId,
        /// Persisted status.
        status: TaskStatus,
    },
}

/// Error returned while parsing task statuses from requests or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
