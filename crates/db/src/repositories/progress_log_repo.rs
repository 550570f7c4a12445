//! Repository for the `progress_logs` table.
//!
//! As with projects, every mutation carries the author predicate so the
//! database refuses cross-identity edits on its own.

use codeprogress_core::types::DbId;
use sqlx::PgPool;

use crate::models::progress_log::{
    CreateProgressLog, ProgressLog, ProgressLogWithAuthor, ProgressLogWithProject,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, user_id, content, created_at, updated_at";

/// Provides CRUD operations for progress logs.
pub struct ProgressLogRepo;

impl ProgressLogRepo {
    /// Insert a new progress log, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProgressLog,
    ) -> Result<ProgressLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO progress_logs (project_id, user_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgressLog>(&query)
            .bind(input.project_id)
            .bind(input.user_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a log by its internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProgressLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM progress_logs WHERE id = $1");
        sqlx::query_as::<_, ProgressLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a log joined with its author's display name.
    pub async fn find_with_author(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProgressLogWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, ProgressLogWithAuthor>(
            "SELECT l.id, l.project_id, l.user_id, l.content, l.created_at, l.updated_at,
                    COALESCE(pr.full_name, 'Anonymous') AS author_name
             FROM progress_logs l
             LEFT JOIN profiles pr ON pr.id = l.user_id
             WHERE l.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List one project's logs joined with author names, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProgressLogWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, ProgressLogWithAuthor>(
            "SELECT l.id, l.project_id, l.user_id, l.content, l.created_at, l.updated_at,
                    COALESCE(pr.full_name, 'Anonymous') AS author_name
             FROM progress_logs l
             LEFT JOIN profiles pr ON pr.id = l.user_id
             WHERE l.project_id = $1
             ORDER BY l.created_at DESC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// List all logs belonging to any of the given projects, joined with
    /// the project title, newest first. Callers short-circuit on an empty
    /// id set before reaching this query.
    pub async fn list_for_projects(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<ProgressLogWithProject>, sqlx::Error> {
        sqlx::query_as::<_, ProgressLogWithProject>(
            "SELECT l.id, l.project_id, l.content, l.created_at, p.title AS project_title
             FROM progress_logs l
             JOIN projects p ON p.id = l.project_id
             WHERE l.project_id = ANY($1)
             ORDER BY l.created_at DESC",
        )
        .bind(project_ids)
        .fetch_all(pool)
        .await
    }

    /// Replace a log's content. Only matches when `author_id` wrote the
    /// row; returns `None` otherwise.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        author_id: DbId,
        content: &str,
    ) -> Result<Option<ProgressLog>, sqlx::Error> {
        let query = format!(
            "UPDATE progress_logs
             SET content = $3, updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgressLog>(&query)
            .bind(id)
            .bind(author_id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a log written by `author_id`. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, id: DbId, author_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM progress_logs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
