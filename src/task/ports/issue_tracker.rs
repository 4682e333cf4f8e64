//! Port for the external issue tracker.

use crate::project::domain::RepositoryCoordinates;
use crate::task::domain::{IssueComment, IssueDetails, IssueDraft, IssueNumber};
use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

/// Result type for issue tracker calls.
pub type IssueTrackerResult<T> = Result<T, IssueTrackerError>;

/// Network client for the tracker that mirrors tasks as issues.
///
/// Every call is a single attempt; retries are the caller's concern.
#[async_trait]
pub trait IssueTrackerClient: Send + Sync {
    /// Opens an issue and returns its number.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError`] when the tracker rejects the call.
    async fn create_issue(
        &self,
        repository: &RepositoryCoordinates,
        draft: &IssueDraft,
        credential: &SecretString,
    ) -> IssueTrackerResult<IssueNumber>;

    /// Closes an issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError`] when the tracker rejects the call.
    async fn close_issue(
        &self,
        repository: &RepositoryCoordinates,
        issue_number: IssueNumber,
        credential: &SecretString,
    ) -> IssueTrackerResult<()>;

    /// Reopens a closed issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError`] when the tracker rejects the call.
    async fn reopen_issue(
        &self,
        repository: &RepositoryCoordinates,
        issue_number: IssueNumber,
        credential: &SecretString,
    ) -> IssueTrackerResult<()>;

    /// Reads issue details.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError`] when the tracker rejects the call.
    async fn issue_details(
        &self,
        repository: &RepositoryCoordinates,
        issue_number: IssueNumber,
        credential: &SecretString,
    ) -> IssueTrackerResult<IssueDetails>;

    /// Reads the comments posted on an issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError`] when the tracker rejects the call.
    async fn issue_comments(
        &self,
        repository: &RepositoryCoordinates,
        issue_number: IssueNumber,
        credential: &SecretString,
    ) -> IssueTrackerResult<Vec<IssueComment>>;
}

/// Integration failures reported by the issue tracker.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssueTrackerError {
    /// The credential was rejected or lacks permissions.
    #[error("issue tracker authorization failed: {0}")]
    Unauthorized(String),

    /// The repository or issue does not exist.
    #[error("issue tracker resource not found: {0}")]
    NotFound(String),

    /// Any other tracker API failure.
    #[error("issue tracker API error: {0}")]
    Api(String),
}
