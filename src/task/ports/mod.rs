//! Port contracts for task synchronization.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod issue_tracker;
pub mod notifier;
pub mod repository;

pub use issue_tracker::{IssueTrackerClient, IssueTrackerError, IssueTrackerResult};
pub use notifier::{NotifierError, RealtimeNotifier, TaskUpdatedEvent, UpdateSource};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
