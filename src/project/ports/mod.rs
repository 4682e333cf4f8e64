//! Port contracts for project management.
//!
//! Ports define infrastructure-agnostic interfaces used by project and task
//! services.

pub mod repository;
pub mod token_protector;

pub use repository::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
pub use token_protector::{TokenProtectionError, TokenProtector};
