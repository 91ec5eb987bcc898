//! Record entity model.

use dataflow_core::record::CreatedRecord;
use dataflow_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `records` table.
///
/// Records are created once and never updated or deleted, so the entity
/// carries no modification timestamp or soft-delete flag.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Record {
    pub id_record: DbId,
    pub id_account: DbId,
    pub title: String,
    pub date_created: Timestamp,
}

impl From<Record> for CreatedRecord {
    fn from(record: Record) -> Self {
        CreatedRecord {
            id_record: record.id_record,
            title: record.title,
            date_created: record.date_created,
        }
    }
}
