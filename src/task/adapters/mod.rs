//! Adapters for task ports.
//!
//! - [`memory`]: thread-safe in-memory implementations for tests and demos
//! - [`postgres`]: `PostgreSQL` persistence using Diesel

pub mod memory;
pub mod postgres;
