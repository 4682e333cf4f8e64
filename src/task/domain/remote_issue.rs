//! Read models for issues held by the external tracker.

use super::{IssueNumber, TaskId, TaskTitle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content sent to the tracker when opening an issue for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDraft {
    title: TaskTitle,
    body: Option<String>,
}

impl IssueDraft {
    /// Creates a draft; a blank body is dropped.
    #[must_use]
    pub fn new(title: TaskTitle, body: Option<String>) -> Self {
        Self {
            title,
            body: body
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty()),
        }
    }

    /// Returns the issue title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the issue body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Tracker user shown as issue author, assignee, or commenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueUser {
    /// Account login.
    pub login: String,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Profile page URL.
    pub profile_url: Option<String>,
}

/// Label attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueLabel {
    /// Label name.
    pub name: String,
    /// Hex colour without the leading `#`.
    pub color: Option<String>,
}

/// Issue details as reported by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDetails {
    /// Issue number within its repository.
    pub number: IssueNumber,
    /// Current title.
    pub title: String,
    /// Issue body.
    pub description: Option<String>,
    /// Tracker state, such as `open` or `closed`.
    pub state: String,
    /// Reason recorded for the current state.
    pub state_reason: Option<String>,
    /// Issue author.
    pub author: Option<IssueUser>,
    /// Assigned users.
    pub assignees: Vec<IssueUser>,
    /// Attached labels.
    pub labels: Vec<IssueLabel>,
    /// Number of comments on the issue.
    pub comments_count: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Web URL of the issue.
    pub url: Option<String>,
}

/// Comment posted on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueComment {
    /// Tracker comment identifier.
    pub id: i64,
    /// Comment body.
    pub body: String,
    /// Comment author.
    pub author: Option<IssueUser>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Web URL of the comment.
    pub url: Option<String>,
}

/// Issue details annotated with the local task they mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskIssueDetails {
    /// Local task identifier.
    pub task_id: TaskId,
    /// Details reported by the tracker.
    #[serde(flatten)]
    pub details: IssueDetails,
}

/// Issue comments annotated with the local task they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskIssueComments {
    /// Local task identifier.
    pub task_id: TaskId,
    /// Comments reported by the tracker.
    pub comments: Vec<IssueComment>,
}
