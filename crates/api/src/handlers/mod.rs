//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate persistence to the [`dataflow_db::RecordStore`] in
//! [`crate::state::AppState`] and map errors via [`crate::error::AppError`].

pub mod record;
