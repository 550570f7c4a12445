//! Repository for the `projects` table.
//!
//! Mutating statements carry a `user_id` predicate in addition to the id,
//! so ownership is enforced at the row level even if a handler check were
//! bypassed.

use codeprogress_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectWithOwner, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, user_id, tags, github_url, project_url, created_at, updated_at";

/// Same columns qualified for the profile join, plus the owner name.
/// Owners signed up but not yet signed in have no profile row, so the join
/// is LEFT and the name falls back to "Anonymous".
const JOINED_COLUMNS: &str = "p.id, p.title, p.user_id, p.tags, p.github_url, p.project_url, \
                              p.created_at, p.updated_at, \
                              COALESCE(pr.full_name, 'Anonymous') AS owner_name";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, user_id, tags, github_url, project_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(input.user_id)
            .bind(&input.tags)
            .bind(&input.github_url)
            .bind(&input.project_url)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project joined with its owner's display name.
    pub async fn find_with_owner(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p
             LEFT JOIN profiles pr ON pr.id = p.user_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, ProjectWithOwner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects joined with owner names, newest first.
    pub async fn list_with_owner(pool: &PgPool) -> Result<Vec<ProjectWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p
             LEFT JOIN profiles pr ON pr.id = p.user_id
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, ProjectWithOwner>(&query)
            .fetch_all(pool)
            .await
    }

    /// Ids of every project owned by the given user.
    pub async fn list_ids_by_owner(pool: &PgPool, user_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as("SELECT id FROM projects WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Replace a project's mutable fields. The statement only matches when
    /// `owner_id` owns the row; returns `None` otherwise (missing row or
    /// foreign owner alike).
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects
             SET title = $3, tags = $4, github_url = $5, project_url = $6, updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.tags)
            .bind(&input.github_url)
            .bind(&input.project_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project owned by `owner_id`. Returns `true` if a row was
    /// removed. Progress logs cascade.
    pub async fn delete(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
