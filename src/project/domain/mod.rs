//! Domain model for projects and their repository coordinates.

mod error;
mod ids;
mod project;

pub use error::ProjectDomainError;
pub use ids::{ProjectId, ProtectedToken, RepositoryCoordinates};
pub use project::{PersistedProjectData, Project};
