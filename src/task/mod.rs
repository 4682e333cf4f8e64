//! Local tasks mirrored as issues in an external tracker.
//!
//! Creating a task opens an issue; moving a task across the done boundary
//! closes or reopens it. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
