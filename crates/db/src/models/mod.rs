//! Row models.

pub mod record;
