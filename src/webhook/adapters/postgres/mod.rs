//! `PostgreSQL` delivery ledger.

mod ledger;
mod models;
mod schema;

pub use ledger::PostgresDeliveryLedger;
