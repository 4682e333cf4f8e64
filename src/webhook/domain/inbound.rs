//! Raw webhook request as received at the ingestion boundary.

use super::WebhookDomainError;

/// Header carrying the event name.
pub const EVENT_HEADER: &str = "X-GitHub-Event";
/// Header carrying the delivery identifier.
pub const DELIVERY_HEADER: &str = "X-GitHub-Delivery";
/// Header carrying the `sha256=` payload signature.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";
/// The only event name that is synchronized.
pub const ISSUES_EVENT: &str = "issues";

/// Unauthenticated webhook request.
///
/// The body is kept as raw bytes because the signature covers them exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundWebhook {
    event_name: String,
    delivery_id: String,
    signature: Option<String>,
    body: Vec<u8>,
}

impl InboundWebhook {
    /// Captures a webhook request.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookDomainError::MissingField`] when the event name or
    /// delivery identifier is blank.
    pub fn new(
        event_name: &str,
        delivery_id: &str,
        signature: Option<&str>,
        body: impl Into<Vec<u8>>,
    ) -> Result<Self, WebhookDomainError> {
        if event_name.trim().is_empty() {
            return Err(WebhookDomainError::MissingField {
                field: EVENT_HEADER,
            });
        }
        if delivery_id.trim().is_empty() {
            return Err(WebhookDomainError::MissingField {
                field: DELIVERY_HEADER,
            });
        }
        Ok(Self {
            event_name: event_name.trim().to_owned(),
            delivery_id: delivery_id.trim().to_owned(),
            signature: signature.map(str::to_owned),
            body: body.into(),
        })
    }

    /// Returns the trimmed event name.
    #[must_use]
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Returns the trimmed delivery identifier.
    #[must_use]
    pub fn delivery_id(&self) -> &str {
        &self.delivery_id
    }

    /// Returns the signature header value, if any.
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns whether this is an `issues` event (case-insensitive).
    #[must_use]
    pub fn is_issues_event(&self) -> bool {
        self.event_name.eq_ignore_ascii_case(ISSUES_EVENT)
    }
}
