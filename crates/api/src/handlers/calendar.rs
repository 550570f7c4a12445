//! Handlers for the calendar view: a month grid of per-day log counts
//! over every project the caller owns, and the log list for one day.
//!
//! Both endpoints resolve the caller's project ids first and short-
//! circuit when there are none, skipping the log query entirely.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use codeprogress_core::calendar::{local_date, month_grid, viewer_offset};
use codeprogress_db::models::progress_log::ProgressLogWithProject;
use codeprogress_db::repositories::{ProgressLogRepo, ProjectRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /calendar`.
#[derive(Debug, Deserialize)]
pub struct MonthParams {
    pub year: i32,
    /// Month, 1-based.
    pub month: u32,
    /// Viewer's UTC offset in minutes east of UTC. Defaults to UTC.
    #[serde(default)]
    pub tz_offset_mins: i32,
}

/// Query parameters for `GET /calendar/day`.
#[derive(Debug, Deserialize)]
pub struct DayParams {
    /// Calendar day in the viewer's zone, `YYYY-MM-DD`.
    pub date: NaiveDate,
    #[serde(default)]
    pub tz_offset_mins: i32,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /calendar?year=&month=&tz_offset_mins=
///
/// Derive the month grid from all logs across the caller's projects.
pub async fn month(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> AppResult<impl IntoResponse> {
    let offset = viewer_offset(params.tz_offset_mins).map_err(AppError::Core)?;

    let stamps = match owned_logs(&state, &auth).await? {
        Some(logs) => logs.into_iter().map(|l| l.created_at).collect(),
        None => Vec::new(),
    };

    let grid = month_grid(params.year, params.month, &stamps, offset).map_err(AppError::Core)?;
    Ok(Json(DataResponse { data: grid }))
}

/// GET /calendar/day?date=&tz_offset_mins=
///
/// All of the caller's logs on one calendar day, each tagged with its
/// parent project's title, newest first.
pub async fn day(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<DayParams>,
) -> AppResult<impl IntoResponse> {
    let offset = viewer_offset(params.tz_offset_mins).map_err(AppError::Core)?;

    let logs = match owned_logs(&state, &auth).await? {
        Some(logs) => logs
            .into_iter()
            .filter(|l| local_date(l.created_at, offset) == params.date)
            .collect(),
        None => Vec::new(),
    };

    Ok(Json(DataResponse { data: logs }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// All logs across the caller's projects, or `None` when the caller owns
/// no projects (in which case the log query is never issued).
async fn owned_logs(
    state: &AppState,
    auth: &AuthUser,
) -> AppResult<Option<Vec<ProgressLogWithProject>>> {
    let project_ids = ProjectRepo::list_ids_by_owner(&state.pool, auth.user_id).await?;
    if project_ids.is_empty() {
        return Ok(None);
    }
    let logs = ProgressLogRepo::list_for_projects(&state.pool, &project_ids).await?;
    Ok(Some(logs))
}
