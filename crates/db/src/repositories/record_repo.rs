//! PostgreSQL-backed record store.

use async_trait::async_trait;
use dataflow_core::types::DbId;
use sqlx::PgPool;

use crate::error::{classify, StoreError};
use crate::models::record::Record;
use crate::repositories::RecordStore;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id_record, id_account, title, date_created";

/// Creates records through the `sp_record_create` SQL function.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create(&self, account_id: DbId, title: &str) -> Result<Record, StoreError> {
        let mut tx = self.pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM sp_record_create($1, $2)");
        let record = sqlx::query_as::<_, Record>(&query)
            .bind(account_id)
            .bind(title)
            .fetch_one(&mut *tx)
            .await
            .map_err(classify)?;

        tx.commit().await?;

        tracing::debug!(
            id_record = record.id_record,
            id_account = account_id,
            "Record persisted"
        );
        Ok(record)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
