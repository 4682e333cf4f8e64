//! In-memory ledger sharing state with the in-memory task repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::task::{adapters::memory::InMemoryTaskRepository, domain::Task};
use crate::webhook::{
    domain::{DeliveryId, DeliveryRecord},
    ports::{DeliveryLedger, DeliveryLedgerError, DeliveryLedgerResult},
};

/// Thread-safe in-memory delivery ledger.
///
/// Commits hold the ledger lock while writing the task, so a delivery entry
/// and its task change become visible together.
#[derive(Debug, Clone)]
pub struct InMemoryDeliveryLedger {
    records: Arc<Mutex<HashMap<DeliveryId, DeliveryRecord>>>,
    tasks: InMemoryTaskRepository,
}

impl InMemoryDeliveryLedger {
    /// Creates an empty ledger writing task changes into `tasks`.
    #[must_use]
    pub fn new(tasks: InMemoryTaskRepository) -> Self {
        Self {
            records: Arc::default(),
            tasks,
        }
    }

    /// Returns every recorded delivery.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryLedgerError::Persistence`] when the lock is poisoned.
    pub fn records(&self) -> DeliveryLedgerResult<Vec<DeliveryRecord>> {
        Ok(self.lock()?.values().cloned().collect())
    }

    fn lock(&self) -> DeliveryLedgerResult<MutexGuard<'_, HashMap<DeliveryId, DeliveryRecord>>> {
        self.records.lock().map_err(|err| {
            DeliveryLedgerError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl DeliveryLedger for InMemoryDeliveryLedger {
    async fn contains(&self, delivery_id: &DeliveryId) -> DeliveryLedgerResult<bool> {
        Ok(self.lock()?.contains_key(delivery_id))
    }

    async fn commit(
        &self,
        record: &DeliveryRecord,
        changed_task: Option<&Task>,
    ) -> DeliveryLedgerResult<()> {
        let mut records = self.lock()?;
        if records.contains_key(record.delivery_id()) {
            return Err(DeliveryLedgerError::DuplicateDelivery(
                record.delivery_id().clone(),
            ));
        }
        if let Some(task) = changed_task {
            self.tasks.replace_existing(task)?;
        }
        records.insert(record.delivery_id().clone(), record.clone());
        Ok(())
    }
}
