//! Diesel row models for the delivery ledger.

use super::schema::webhook_deliveries;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Insert model for ledger entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = webhook_deliveries)]
pub struct NewDeliveryRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Tracker delivery identifier.
    pub delivery_id: String,
    /// Event name header value.
    pub event_name: String,
    /// Receive timestamp.
    pub received_at: DateTime<Utc>,
}
