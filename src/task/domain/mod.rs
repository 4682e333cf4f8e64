//! Domain model for synchronized tasks.
//!
//! The task domain models the status state machine and issue binding while
//! keeping all infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod remote_issue;
mod task;
mod title;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{IssueNumber, TaskId};
pub use remote_issue::{
    IssueComment, IssueDetails, IssueDraft, IssueLabel, IssueUser, TaskIssueComments,
    TaskIssueDetails,
};
pub use task::{PersistedTaskData, Task, TaskStatus};
pub use title::TaskTitle;
