//! Step definitions for webhook synchronization scenarios.

mod given;
mod then;
mod when;
pub mod world;
