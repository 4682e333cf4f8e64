//! Adapters for the delivery ledger port.

pub mod memory;
pub mod postgres;
