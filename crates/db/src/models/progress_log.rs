//! Progress log entity model and DTOs.

use codeprogress_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `progress_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgressLog {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A log joined with its author's display name, as the per-project
/// timeline returns it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgressLogWithAuthor {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author_name: String,
}

/// A log joined with its parent project's title, as the calendar
/// derivation consumes it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgressLogWithProject {
    pub id: DbId,
    pub project_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub project_title: String,
}

/// DTO for creating a new progress log. Content is already validated by
/// the caller.
#[derive(Debug, Clone)]
pub struct CreateProgressLog {
    pub project_id: DbId,
    pub user_id: DbId,
    pub content: String,
}
