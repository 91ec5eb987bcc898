//! Client side of the DataFlow create-record flow.
//!
//! - [`api`] -- HTTP transport for `POST /api/v1/internal/record`.
//! - [`flow`] -- Submission flow: local validation, in-flight guard, callbacks.
//! - [`form`] -- Form state bound to a submission flow.

pub mod api;
pub mod config;
pub mod flow;
pub mod form;

pub use api::{ClientError, RecordApi, RecordTransport};
pub use flow::{SubmissionFlow, SubmissionState, SubmitError};
pub use form::RecordForm;
