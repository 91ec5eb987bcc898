//! In-memory record store.
//!
//! Assigns sequential ids starting at 1 and enforces the same per-account
//! duplicate-title rule as `sp_record_create`. Nothing survives a restart.

use std::sync::Mutex;

use async_trait::async_trait;
use dataflow_core::types::DbId;

use crate::error::StoreError;
use crate::models::record::Record;
use crate::repositories::RecordStore;

#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: Mutex<Vec<Record>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record created so far, oldest first.
    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Record>> {
        // A poisoned lock only means another test thread panicked mid-push;
        // the vector itself is still consistent.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create(&self, account_id: DbId, title: &str) -> Result<Record, StoreError> {
        let mut records = self.lock();

        let folded = title.to_lowercase();
        if records
            .iter()
            .any(|r| r.id_account == account_id && r.title.to_lowercase() == folded)
        {
            return Err(StoreError::duplicate_title());
        }

        let record = Record {
            id_record: records.len() as DbId + 1,
            id_account: account_id,
            title: title.to_string(),
            date_created: chrono::Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
