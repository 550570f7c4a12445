pub mod auth;
pub mod calendar;
pub mod health;
pub mod progress;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                 register (public)
/// /auth/confirm                follow confirmation link (public)
/// /auth/login                  login (public)
/// /auth/refresh                refresh (public)
/// /auth/logout                 logout (requires auth)
/// /auth/me                     current session (requires auth)
///
/// /projects                    list (public), create (auth)
/// /projects/{id}               get (public), update/delete (owner)
/// /projects/{project_id}/logs  list (public), create (owner)
/// /logs/{id}                   update/delete (author)
///
/// /calendar                    month grid over own projects (auth)
/// /calendar/day                one day's logs (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/logs", progress::router())
        .nest("/calendar", calendar::router())
}
