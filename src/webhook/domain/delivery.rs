//! Delivery identifiers and ledger records.

use super::WebhookDomainError;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

fn bounded(value: &str, field: &'static str, max: usize) -> Result<String, WebhookDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WebhookDomainError::MissingField { field });
    }
    if trimmed.chars().count() > max {
        return Err(WebhookDomainError::FieldTooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

/// Tracker-assigned identifier of one delivery, unique across redeliveries
/// of different events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryId(String);

impl DeliveryId {
    /// Maximum length in characters.
    pub const MAX_LENGTH: usize = 100;

    /// Creates a validated delivery identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookDomainError`] when the value is blank or too long.
    pub fn new(value: &str) -> Result<Self, WebhookDomainError> {
        bounded(value, "delivery id", Self::MAX_LENGTH).map(Self)
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Event name header value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventName(String);

impl EventName {
    /// Maximum length in characters.
    pub const MAX_LENGTH: usize = 50;

    /// Creates a validated event name.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookDomainError`] when the value is blank or too long.
    pub fn new(value: &str) -> Result<Self, WebhookDomainError> {
        bounded(value, "event name", Self::MAX_LENGTH).map(Self)
    }

    /// Returns the event name text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Append-only ledger entry proving a delivery was handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    id: Uuid,
    delivery_id: DeliveryId,
    event_name: EventName,
    received_at: DateTime<Utc>,
}

impl DeliveryRecord {
    /// Records a delivery received now.
    #[must_use]
    pub fn new(delivery_id: DeliveryId, event_name: EventName, clock: &impl Clock) -> Self {
        Self::from_parts(Uuid::new_v4(), delivery_id, event_name, clock.utc())
    }

    /// Reconstructs a record from stored values.
    #[must_use]
    pub const fn from_parts(
        id: Uuid,
        delivery_id: DeliveryId,
        event_name: EventName,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            delivery_id,
            event_name,
            received_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the delivery identifier.
    #[must_use]
    pub const fn delivery_id(&self) -> &DeliveryId {
        &self.delivery_id
    }

    /// Returns the event name.
    #[must_use]
    pub const fn event_name(&self) -> &EventName {
        &self.event_name
    }

    /// Returns when the delivery was received.
    #[must_use]
    pub const fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}
