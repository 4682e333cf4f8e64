//! In-memory project adapters.

mod project;
mod token;

pub use project::InMemoryProjectRepository;
pub use token::PassthroughTokenProtector;
