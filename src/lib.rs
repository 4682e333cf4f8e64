//! Tasklink: bidirectional synchronization of local tasks with an external
//! issue tracker.
//!
//! Local status changes propagate outward as issue state changes, and issue
//! events received by webhook propagate inward as task updates, with
//! at-most-once side effects per delivery.
//!
//! # Architecture
//!
//! Tasklink follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`project`]: Projects and the repository each one mirrors
//! - [`task`]: Task state machine and outbound synchronization
//! - [`webhook`]: Signature validation, delivery ledger and inbound
//!   synchronization
//! - [`error`]: Error classification and status dispatch
//! - [`config`]: Environment configuration
//! - [`telemetry`]: Logging setup
//! - [`persistence`]: Shared `PostgreSQL` plumbing

pub mod config;
pub mod error;
pub mod persistence;
pub mod project;
pub mod task;
pub mod telemetry;
pub mod webhook;
