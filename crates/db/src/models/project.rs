//! Project entity model and DTOs.

use codeprogress_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub user_id: DbId,
    pub tags: Vec<String>,
    pub github_url: Option<String>,
    pub project_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project joined with its owner's display name, as the list and detail
/// endpoints return it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectWithOwner {
    pub id: DbId,
    pub title: String,
    pub user_id: DbId,
    pub tags: Vec<String>,
    pub github_url: Option<String>,
    pub project_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Owner's profile name; "Anonymous" when no profile row exists yet.
    pub owner_name: String,
}

/// DTO for creating a new project. Title and tags are already validated
/// and normalised by the caller.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: String,
    pub user_id: DbId,
    pub tags: Vec<String>,
    pub github_url: Option<String>,
    pub project_url: Option<String>,
}

/// DTO for updating a project. All mutable fields are replaced wholesale,
/// matching the edit form's save semantics.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub title: String,
    pub tags: Vec<String>,
    pub github_url: Option<String>,
    pub project_url: Option<String>,
}
