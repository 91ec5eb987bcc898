//! Route definitions for authenticated internal endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::record;
use crate::state::AppState;

/// Routes mounted at `/internal`.
///
/// ```text
/// POST   /record                            -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/record", post(record::create))
}
