//! JWT-based account context extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use dataflow_core::error::CoreError;
use dataflow_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller and the account it acts for.
///
/// Any handler that creates account-scoped data takes this as a parameter;
/// the account is never implicit state.
///
/// ```ignore
/// async fn my_handler(caller: AuthAccount) -> AppResult<Json<()>> {
///     tracing::info!(account_id = caller.account_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthAccount {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub account_id: DbId,
}

impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        if claims.account_id <= 0 {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Token carries no valid account".into(),
            )));
        }

        Ok(AuthAccount {
            user_id: claims.sub,
            account_id: claims.account_id,
        })
    }
}
