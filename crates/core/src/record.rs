//! Record title rule and the create-record wire contract.
//!
//! The title rule is defined once here. The HTTP handler and the client
//! submission flow both validate through [`CreateRecord::validate`], which
//! delegates to [`validate_title`], so the two enforcement points cannot
//! drift apart.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::{DbId, Timestamp};

/* --------------------------------------------------------------------------
Named constants
-------------------------------------------------------------------------- */

/// Minimum title length, in characters, after trimming.
pub const TITLE_MIN_LEN: usize = 3;

/// Maximum title length, in characters, before trimming.
pub const TITLE_MAX_LEN: usize = 100;

/// Name of the only validated field, as it appears on the wire.
pub const TITLE_FIELD: &str = "title";

/* --------------------------------------------------------------------------
Title rule
-------------------------------------------------------------------------- */

/// The specific constraint a candidate title breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TitleViolation {
    #[error("Title must be at least {} characters long", TITLE_MIN_LEN)]
    TooShort,
    #[error("Title must be at most {} characters long", TITLE_MAX_LEN)]
    TooLong,
    #[error("Title cannot contain only special characters")]
    OnlySpecialCharacters,
}

impl TitleViolation {
    /// Stable machine code reported in field violations.
    pub fn code(self) -> &'static str {
        match self {
            TitleViolation::TooShort => "too_short",
            TitleViolation::TooLong => "too_long",
            TitleViolation::OnlySpecialCharacters => "only_special_characters",
        }
    }

    /// Inverse of [`TitleViolation::code`].
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "too_short" => Some(TitleViolation::TooShort),
            "too_long" => Some(TitleViolation::TooLong),
            "only_special_characters" => Some(TitleViolation::OnlySpecialCharacters),
            _ => None,
        }
    }
}

/// Check a candidate title against the record title rule.
///
/// The upper bound applies to the title as submitted, surrounding whitespace
/// included; the lower bound applies to the trimmed title. Constraints are
/// checked in order (too long, too short, only special characters) and the
/// first one broken is returned, so `"!!"` reports `TooShort` and 150 spaces
/// report `TooLong`.
///
/// Only ASCII letters and digits count as alphanumeric, so a title made
/// entirely of non-ASCII characters such as `"日本語"` reports
/// `OnlySpecialCharacters`.
pub fn validate_title(title: &str) -> Result<(), TitleViolation> {
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(TitleViolation::TooLong);
    }

    let trimmed = title.trim();
    if trimmed.chars().count() < TITLE_MIN_LEN {
        return Err(TitleViolation::TooShort);
    }
    if !trimmed.chars().any(|c| c.is_ascii_alphanumeric()) {
        return Err(TitleViolation::OnlySpecialCharacters);
    }
    Ok(())
}

/// The form of a title that gets persisted.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_string()
}

fn validate_title_field(title: &str) -> Result<(), ValidationError> {
    validate_title(title).map_err(|violation| {
        let mut err = ValidationError::new(violation.code());
        err.message = Some(Cow::Owned(violation.to_string()));
        err
    })
}

/* --------------------------------------------------------------------------
Wire DTOs
-------------------------------------------------------------------------- */

/// Body of `POST /api/v1/internal/record`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateRecord {
    #[validate(custom(function = "validate_title_field"))]
    pub title: String,
}

impl CreateRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Public fields of a freshly created record, as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRecord {
    pub id_record: DbId,
    pub title: String,
    pub date_created: Timestamp,
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
