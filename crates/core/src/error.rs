use crate::validation::{summarize, FieldViolation};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The payload does not have the expected shape (missing field, wrong type,
    /// unparseable body). Detected before any rule runs.
    #[error("Malformed payload: {}", summarize(.0))]
    Shape(Vec<FieldViolation>),

    /// The payload is well-shaped but breaks a validation rule.
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldViolation>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
