//! Handlers for progress logs: the per-project timeline and the two
//! author-scoped mutation endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use codeprogress_core::error::CoreError;
use codeprogress_core::progress::validate_content;
use codeprogress_core::types::DbId;
use codeprogress_db::models::progress_log::{CreateProgressLog, ProgressLog};
use codeprogress_db::repositories::{ProgressLogRepo, ProjectRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::project::ensure_owner;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating or editing a progress log.
#[derive(Debug, Deserialize)]
pub struct LogInput {
    pub content: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /projects/{project_id}/logs
///
/// One project's timeline, newest first, each log joined with its
/// author's display name. Publicly readable like the project itself.
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    // 404 for an unknown project rather than an empty timeline.
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let logs = ProgressLogRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// POST /projects/{project_id}/logs
///
/// Append a log to a project. Only the project owner may post; empty
/// (after trimming) content is rejected before any insert.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<LogInput>,
) -> AppResult<impl IntoResponse> {
    ensure_owner(
        &state,
        project_id,
        &auth,
        "Only the project owner may add progress logs",
    )
    .await?;

    validate_content(&input.content).map_err(AppError::Core)?;

    let create = CreateProgressLog {
        project_id,
        user_id: auth.user_id,
        content: input.content,
    };
    let log = ProgressLogRepo::create(&state.pool, &create).await?;

    tracing::info!(
        user_id = auth.user_id,
        project_id,
        log_id = log.id,
        "Progress log created"
    );

    let joined = ProgressLogRepo::find_with_author(&state.pool, log.id)
        .await?
        .ok_or_else(|| AppError::InternalError("Created log could not be re-read".into()))?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: joined })))
}

/// PUT /logs/{id}
///
/// Replace a log's content. Author only.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<LogInput>,
) -> AppResult<impl IntoResponse> {
    ensure_author(&state, id, &auth, "Only the author may edit a progress log").await?;

    validate_content(&input.content).map_err(AppError::Core)?;

    // The statement re-checks authorship; None here means the row vanished
    // between the check and the update.
    ProgressLogRepo::update(&state.pool, id, auth.user_id, &input.content)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProgressLog",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, log_id = id, "Progress log updated");

    let joined = ProgressLogRepo::find_with_author(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProgressLog",
            id,
        }))?;
    Ok(Json(DataResponse { data: joined }))
}

/// DELETE /logs/{id}
///
/// Remove a log. Author only.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_author(&state, id, &auth, "Only the author may delete a progress log").await?;

    let deleted = ProgressLogRepo::delete(&state.pool, id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ProgressLog",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, log_id = id, "Progress log deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a log and refuse callers who did not write it.
async fn ensure_author(
    state: &AppState,
    id: DbId,
    auth: &AuthUser,
    denial: &str,
) -> AppResult<ProgressLog> {
    let log = ProgressLogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProgressLog",
            id,
        }))?;

    if log.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(denial.into())));
    }

    Ok(log)
}
