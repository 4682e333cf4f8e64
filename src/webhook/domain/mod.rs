//! Domain model for webhook deliveries.

mod delivery;
mod error;
mod inbound;
mod payload;

pub use delivery::{DeliveryId, DeliveryRecord, EventName};
pub use error::{WebhookDomainError, WebhookPayloadError};
pub use inbound::{
    DELIVERY_HEADER, EVENT_HEADER, ISSUES_EVENT, InboundWebhook, SIGNATURE_HEADER,
};
pub use payload::{IssueAction, IssueEvent};
