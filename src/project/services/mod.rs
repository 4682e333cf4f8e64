//! Application services for project registration.

mod registry;

pub use registry::{
    CreateProjectRequest, MAX_TOKEN_LENGTH, ProjectRegistry, ProjectRegistryError,
    ProjectRegistryResult,
};
