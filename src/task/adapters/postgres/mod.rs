//! `PostgreSQL` adapters for task persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresTaskRepository;
pub(crate) use repository::update_task_row;
