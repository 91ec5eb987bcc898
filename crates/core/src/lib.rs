//! DataFlow core domain logic.
//!
//! Pure types and rules shared by the HTTP server and the client: the record
//! title rule, the wire DTOs, field-level violations, and the error taxonomy.
//! Nothing in this crate performs I/O.

pub mod error;
pub mod record;
pub mod types;
pub mod validation;
