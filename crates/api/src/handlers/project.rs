//! Handlers for the `/projects` resource.
//!
//! The list endpoint fetches the whole collection once (newest first,
//! joined with owner names) and applies the pure filters from
//! `codeprogress_core` in memory -- text, then tags, then ownership --
//! without re-querying. Mutations are double-gated: the handler refuses
//! non-owners with 403, and the repository statement carries the same
//! owner predicate.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use codeprogress_core::error::CoreError;
use codeprogress_core::project::{normalize_link, normalize_tags, validate_title, ProjectFilter};
use codeprogress_core::types::DbId;
use codeprogress_db::models::project::{CreateProject, Project, ProjectWithOwner, UpdateProject};
use codeprogress_db::repositories::ProjectRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /projects`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Case-insensitive substring match on the title.
    pub q: Option<String>,
    /// Comma-separated tags; a project must carry every one of them.
    pub tags: Option<String>,
    /// Keep only the caller's own projects. Requires authentication.
    #[serde(default)]
    pub mine: bool,
}

/// Request body for creating or updating a project.
#[derive(Debug, Deserialize)]
pub struct ProjectInput {
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub github_url: Option<String>,
    pub project_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /projects?q=&tags=&mine=
///
/// Publicly readable; `mine=true` additionally requires a bearer token.
pub async fn list(
    OptionalAuthUser(viewer): OptionalAuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let owner = if params.mine {
        let viewer = viewer.as_ref().ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Sign in to filter by your own projects".into(),
            ))
        })?;
        Some(viewer.user_id)
    } else {
        None
    };

    let filter = ProjectFilter {
        text: params.q.map(|q| q.trim().to_string()).filter(|q| !q.is_empty()),
        tags: params
            .tags
            .as_deref()
            .map(|csv| {
                csv.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        owner,
    };

    let mut projects = ProjectRepo::list_with_owner(&state.pool).await?;
    projects.retain(|p| filter.matches(&p.title, &p.tags, p.user_id));

    Ok(Json(DataResponse { data: projects }))
}

/// GET /projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = find_with_owner(&state, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// POST /projects
///
/// Create a project owned by the caller. An empty (after trimming) title
/// is rejected before anything is inserted; tags are trimmed,
/// deduplicated, and capped at five.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ProjectInput>,
) -> AppResult<impl IntoResponse> {
    let title = validate_title(&input.title).map_err(AppError::Core)?;

    let create = CreateProject {
        title,
        user_id: auth.user_id,
        tags: normalize_tags(&input.tags),
        github_url: normalize_link(input.github_url.as_deref()),
        project_url: normalize_link(input.project_url.as_deref()),
    };

    let project = ProjectRepo::create(&state.pool, &create).await?;

    tracing::info!(
        user_id = auth.user_id,
        project_id = project.id,
        "Project created"
    );

    // Return the row joined with the owner name so clients can prepend it
    // to their list as-is.
    let joined = find_with_owner(&state, project.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: joined })))
}

/// PUT /projects/{id}
///
/// Replace a project's title, tags, and links. Owner only.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ProjectInput>,
) -> AppResult<impl IntoResponse> {
    ensure_owner(&state, id, &auth, "Only the project owner may edit it").await?;

    let title = validate_title(&input.title).map_err(AppError::Core)?;

    let update = UpdateProject {
        title,
        tags: normalize_tags(&input.tags),
        github_url: normalize_link(input.github_url.as_deref()),
        project_url: normalize_link(input.project_url.as_deref()),
    };

    // The statement re-checks ownership; None here means the row vanished
    // between the check and the update.
    ProjectRepo::update(&state.pool, id, auth.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, project_id = id, "Project updated");

    let joined = find_with_owner(&state, id).await?;
    Ok(Json(DataResponse { data: joined }))
}

/// DELETE /projects/{id}
///
/// Delete a project and (by cascade) its progress logs. Owner only.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_owner(&state, id, &auth, "Only the project owner may delete it").await?;

    let deleted = ProjectRepo::delete(&state.pool, id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, project_id = id, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a project joined with its owner name, or 404.
async fn find_with_owner(state: &AppState, id: DbId) -> AppResult<ProjectWithOwner> {
    ProjectRepo::find_with_owner(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// Load a project and refuse callers who do not own it.
///
/// Distinguishes 404 (no such project) from 403 (someone else's project)
/// so a non-owner learns the row exists but not more.
pub(crate) async fn ensure_owner(
    state: &AppState,
    id: DbId,
    auth: &AuthUser,
    denial: &str,
) -> AppResult<Project> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    if project.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(denial.into())));
    }

    Ok(project)
}
