//! Port contracts for inbound webhook processing.

pub mod ledger;

pub use ledger::{DeliveryLedger, DeliveryLedgerError, DeliveryLedgerResult};
