//! Inbound synchronization from issue tracker webhooks.
//!
//! A delivery is authenticated, deduplicated against the delivery ledger,
//! parsed, matched to a local task, and committed together with its ledger
//! entry. Redelivering the same delivery identifier is a no-op.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
