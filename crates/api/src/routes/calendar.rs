//! Route definitions for the `/calendar` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::calendar;
use crate::state::AppState;

/// Routes mounted at `/calendar`.
///
/// ```text
/// GET /     -> month grid
/// GET /day  -> one day's logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(calendar::month))
        .route("/day", get(calendar::day))
}
