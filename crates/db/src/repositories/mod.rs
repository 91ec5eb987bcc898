//! Repository layer.
//!
//! [`RecordStore`] is the capability the request handler depends on. It is a
//! trait (rather than the zero-sized `&PgPool` repos used for plain CRUD) so
//! the handler can run against PostgreSQL or against the in-memory store
//! without changing its contract.

use async_trait::async_trait;
use dataflow_core::types::DbId;

use crate::error::StoreError;
use crate::models::record::Record;

pub mod memory_record_store;
pub mod record_repo;

pub use memory_record_store::InMemoryRecordStore;
pub use record_repo::PgRecordStore;

/// Creates records on behalf of an account.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Atomically create a record owned by `account_id`.
    ///
    /// `title` must already have passed the title rule. Either a fully formed
    /// [`Record`] comes back or nothing was written.
    async fn create(&self, account_id: DbId, title: &str) -> Result<Record, StoreError>;

    /// Confirm the backing store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}
