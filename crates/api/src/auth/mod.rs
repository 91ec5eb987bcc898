//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation. The token carries
//!   the caller's account, which scopes every record it creates.

pub mod jwt;
