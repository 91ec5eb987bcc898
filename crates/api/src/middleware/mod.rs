//! Request extractors.
//!
//! - [`auth::AuthAccount`] -- Resolves the caller's account from a JWT Bearer token.

pub mod auth;
