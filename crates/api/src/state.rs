use std::sync::Arc;

use dataflow_db::RecordStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Where records are created (PostgreSQL or in-memory).
    pub store: Arc<dyn RecordStore>,
    pub config: Arc<ServerConfig>,
}
