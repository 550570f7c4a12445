//! Route definitions for the `/logs` resource (author-scoped mutations).
//!
//! Listing and creation live under `/projects/{project_id}/logs`.

use axum::routing::put;
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Routes mounted at `/logs`.
///
/// ```text
/// PUT    /{id} -> update
/// DELETE /{id} -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(progress::update).delete(progress::delete))
}
