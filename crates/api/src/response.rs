//! Shared response envelope types for API handlers.
//!
//! Successful responses use `{ "data": ..., "success": true }`; failures use
//! `{ "success": false, "error": { ... } }`. Handlers return [`DataResponse`];
//! only [`crate::error::AppError`] builds [`ErrorResponse`].

use dataflow_core::validation::FieldViolation;
use serde::Serialize;

/// Standard success envelope.
///
/// ```ignore
/// Ok((StatusCode::CREATED, Json(DataResponse::new(record))))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
    pub success: bool,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            success: true,
        }
    }
}

/// Standard failure envelope.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

/// Error detail. `code` and `details` are only present for failures the
/// caller is expected to act on field by field.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

impl ErrorResponse {
    /// An error carrying only a human-readable message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::build(None, message.into(), None)
    }

    /// An error with a fixed machine label and a message.
    pub fn coded(code: &'static str, message: impl Into<String>) -> Self {
        Self::build(Some(code), message.into(), None)
    }

    /// A labelled error with per-field violations.
    pub fn with_details(
        code: &'static str,
        message: impl Into<String>,
        details: Vec<FieldViolation>,
    ) -> Self {
        Self::build(Some(code), message.into(), Some(details))
    }

    fn build(
        code: Option<&'static str>,
        message: String,
        details: Option<Vec<FieldViolation>>,
    ) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                code,
                message,
                details,
            },
        }
    }
}
