//! Handlers for the `/internal/record` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dataflow_core::error::CoreError;
use dataflow_core::record::{normalize_title, CreateRecord, CreatedRecord, TITLE_FIELD};
use dataflow_core::validation::{field_violations, FieldViolation};
use serde_json::Value;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthAccount;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/internal/record
///
/// Creates one record owned by the caller's account. The body is checked for
/// shape first, then against the title rule, and only then reaches the store.
pub async fn create(
    State(state): State<AppState>,
    caller: AuthAccount,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedRecord>>)> {
    let input = parse_create_record(payload)?;

    input
        .validate()
        .map_err(|errors| CoreError::Validation(field_violations(&errors)))?;

    let title = normalize_title(&input.title);
    let record = state.store.create(caller.account_id, &title).await?;

    tracing::info!(
        id_record = record.id_record,
        id_account = record.id_account,
        user_id = caller.user_id,
        "Record created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(record.into()))))
}

/// Turn the raw JSON body into a [`CreateRecord`], reporting shape problems
/// (bad JSON, non-object body, missing or non-string `title`) with the
/// offending field path.
fn parse_create_record(payload: Result<Json<Value>, JsonRejection>) -> Result<CreateRecord, CoreError> {
    let Json(body) = payload.map_err(|rejection| {
        CoreError::Shape(vec![FieldViolation::new(
            "",
            "invalid_body",
            rejection.body_text(),
        )])
    })?;

    let Value::Object(mut fields) = body else {
        return Err(CoreError::Shape(vec![FieldViolation::new(
            "",
            "invalid_type",
            "Expected a JSON object",
        )]));
    };

    match fields.remove(TITLE_FIELD) {
        Some(Value::String(title)) => Ok(CreateRecord { title }),
        None | Some(Value::Null) => Err(CoreError::Shape(vec![FieldViolation::new(
            TITLE_FIELD,
            "required",
            "Title is required",
        )])),
        Some(_) => Err(CoreError::Shape(vec![FieldViolation::new(
            TITLE_FIELD,
            "invalid_type",
            "Title must be a string",
        )])),
    }
}
