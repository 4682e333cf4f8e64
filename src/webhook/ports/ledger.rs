//! Idempotency ledger of handled deliveries.

use crate::persistence::PersistenceFailure;
use crate::task::domain::Task;
use crate::task::ports::TaskRepositoryError;
use crate::webhook::domain::{DeliveryId, DeliveryRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for ledger operations.
pub type DeliveryLedgerResult<T> = Result<T, DeliveryLedgerError>;

/// Append-only record of processed deliveries.
///
/// The presence of an entry is the only idempotency signal; entries are
/// never removed.
#[async_trait]
pub trait DeliveryLedger: Send + Sync {
    /// Returns whether the delivery was already recorded.
    async fn contains(&self, delivery_id: &DeliveryId) -> DeliveryLedgerResult<bool>;

    /// Records the delivery and, when given, persists the changed task in the
    /// same atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryLedgerError::DuplicateDelivery`] when another
    /// writer recorded the delivery first; nothing is written in that case.
    async fn commit(
        &self,
        record: &DeliveryRecord,
        changed_task: Option<&Task>,
    ) -> DeliveryLedgerResult<()>;
}

/// Errors returned by ledger implementations.
#[derive(Debug, Clone, Error)]
pub enum DeliveryLedgerError {
    /// The delivery identifier is already recorded.
    #[error("delivery already recorded: {0}")]
    DuplicateDelivery(DeliveryId),

    /// The task write of the commit failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DeliveryLedgerError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl PersistenceFailure for DeliveryLedgerError {
    fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}
