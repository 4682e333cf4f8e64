//! In-memory delivery ledger.

mod ledger;

pub use ledger::InMemoryDeliveryLedger;
