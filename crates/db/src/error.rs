//! Store-level errors and business-rule classification.

/// SQLSTATE raised by `sp_record_create` when the account already owns a
/// record with the same title.
pub const DUPLICATE_TITLE_CODE: &str = "51000";

/// Message reported for [`DUPLICATE_TITLE_CODE`] when the driver error does
/// not carry one of its own.
pub const DUPLICATE_TITLE_MESSAGE: &str = "A record with this title already exists";

/// PostgreSQL unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Index backing the per-account title uniqueness rule.
const TITLE_UNIQUE_CONSTRAINT: &str = "uq_records_account_title";

/// SQLSTATEs that stored procedures raise for domain rejections.
///
/// Only the duplicate-title rule exists today. New domain rules get a code
/// here and are then reported as [`StoreError::BusinessRule`] without any
/// change to the handler.
pub const BUSINESS_RULE_CODES: &[&str] = &[DUPLICATE_TITLE_CODE];

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store refused the write for a domain reason.
    #[error("Business rule violated ({code}): {message}")]
    BusinessRule { code: String, message: String },

    /// Anything else the database reported.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn duplicate_title() -> Self {
        StoreError::BusinessRule {
            code: DUPLICATE_TITLE_CODE.to_string(),
            message: DUPLICATE_TITLE_MESSAGE.to_string(),
        }
    }
}

/// Split a sqlx error into a business-rule failure or an opaque database error.
///
/// A unique violation on the title index is the same rule as
/// [`DUPLICATE_TITLE_CODE`]; it surfaces when two inserts race past the
/// procedure's existence check.
pub fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(sqlstate) = db_err.code() {
            let code: &str = &sqlstate;
            if BUSINESS_RULE_CODES.contains(&code) {
                return StoreError::BusinessRule {
                    code: code.to_string(),
                    message: db_err.message().to_string(),
                };
            }
            if code == UNIQUE_VIOLATION && db_err.constraint() == Some(TITLE_UNIQUE_CONSTRAINT) {
                return StoreError::duplicate_title();
            }
        }
    }
    StoreError::Database(err)
}
