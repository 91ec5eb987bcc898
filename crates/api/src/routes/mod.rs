pub mod health;
pub mod internal;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /internal/record                                 create (POST, auth required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/internal", internal::router())
}
