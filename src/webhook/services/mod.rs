//! Application services for inbound webhook synchronization.

mod processor;
mod signature;

pub use processor::{WebhookError, WebhookOutcome, WebhookPorts, WebhookProcessor};
pub use signature::{SIGNATURE_PREFIX, SignatureError, SignatureValidator, sign_payload};
