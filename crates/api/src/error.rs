use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dataflow_core::error::CoreError;
use dataflow_db::StoreError;

use crate::response::ErrorResponse;

/// Fixed label carried by every shape or validation failure.
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

/// Label for requests without a usable account context.
pub const UNAUTHORIZED: &str = "UNAUTHORIZED";

/// Message for shape and validation failures; the details list says what broke.
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

/// The only thing a caller ever learns about an unexpected failure.
pub const GENERIC_ERROR_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// errors. Implements [`IntoResponse`] to produce consistent JSON envelopes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `dataflow_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An error from the record store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An internal error with a message meant for the logs only.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // --- Shape / validation: field-level detail ---
            AppError::Core(CoreError::Shape(violations))
            | AppError::Core(CoreError::Validation(violations)) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_details(VALIDATION_ERROR, VALIDATION_FAILED_MESSAGE, violations),
            ),

            // --- Business rules: message only ---
            AppError::Store(StoreError::BusinessRule { code, message }) => {
                tracing::info!(%code, %message, "Business rule rejected request");
                (StatusCode::BAD_REQUEST, ErrorResponse::message(message))
            }

            AppError::Core(CoreError::Unauthorized(msg)) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::coded(UNAUTHORIZED, msg),
            ),

            // --- Everything else is opaque to the caller ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
            AppError::Store(StoreError::Database(err)) => {
                tracing::error!(error = %err, "Database error");
                internal_error()
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

fn internal_error() -> (StatusCode, ErrorResponse) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::message(GENERIC_ERROR_MESSAGE),
    )
}
