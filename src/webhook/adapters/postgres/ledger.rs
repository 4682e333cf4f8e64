//! `PostgreSQL` ledger committing deliveries and task changes in one
//! transaction.

use super::{models::NewDeliveryRow, schema::webhook_deliveries};
use crate::persistence::{PgPool, run_blocking};
use crate::task::{adapters::postgres::update_task_row, domain::Task};
use crate::webhook::{
    domain::{DeliveryId, DeliveryRecord},
    ports::{DeliveryLedger, DeliveryLedgerError, DeliveryLedgerResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed delivery ledger.
#[derive(Debug, Clone)]
pub struct PostgresDeliveryLedger {
    pool: PgPool,
}

impl PostgresDeliveryLedger {
    /// Creates a new ledger from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl From<DieselError> for DeliveryLedgerError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl DeliveryLedger for PostgresDeliveryLedger {
    async fn contains(&self, delivery_id: &DeliveryId) -> DeliveryLedgerResult<bool> {
        let lookup = delivery_id.as_str().to_owned();
        run_blocking(&self.pool, move |connection| {
            let found = diesel::select(diesel::dsl::exists(
                webhook_deliveries::table.filter(webhook_deliveries::delivery_id.eq(lookup)),
            ))
            .get_result::<bool>(connection)?;
            Ok(found)
        })
        .await
    }

    async fn commit(
        &self,
        record: &DeliveryRecord,
        changed_task: Option<&Task>,
    ) -> DeliveryLedgerResult<()> {
        let delivery_id = record.delivery_id().clone();
        let row = to_row(record);
        let task = changed_task.cloned();

        run_blocking(&self.pool, move |connection| {
            connection.transaction::<_, DeliveryLedgerError, _>(|tx| {
                diesel::insert_into(webhook_deliveries::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            DeliveryLedgerError::DuplicateDelivery(delivery_id.clone())
                        }
                        other => DeliveryLedgerError::persistence(other),
                    })?;
                if let Some(changed) = &task {
                    update_task_row(tx, changed)?;
                }
                Ok(())
            })
        })
        .await
    }
}

fn to_row(record: &DeliveryRecord) -> NewDeliveryRow {
    NewDeliveryRow {
        id: record.id(),
        delivery_id: record.delivery_id().as_str().to_owned(),
        event_name: record.event_name().as_str().to_owned(),
        received_at: record.received_at(),
    }
}
