//! Route definitions for the `/projects` resource.
//!
//! Also nests the per-project progress-log routes under
//! `/projects/{project_id}/logs`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{progress, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
///
/// GET    /{project_id}/logs     -> list_by_project
/// POST   /{project_id}/logs     -> create log
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{project_id}/logs",
            get(progress::list_by_project).post(progress::create),
        )
}
