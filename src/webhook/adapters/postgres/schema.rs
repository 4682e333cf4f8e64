//! Diesel schema for the delivery ledger.

diesel::table! {
    /// Handled webhook deliveries.
    webhook_deliveries (id) {
        /// Record identifier.
        id -> Uuid,
        /// Tracker delivery identifier, globally unique.
        #[max_length = 100]
        delivery_id -> Varchar,
        /// Event name header value.
        #[max_length = 50]
        event_name -> Varchar,
        /// Receive timestamp.
        received_at -> Timestamptz,
    }
}
