//! Postgres access layer: pool construction, embedded migrations, entity
//! models, and repositories.
//!
//! Ownership rules live in the SQL here, not only in the handlers: every
//! mutating statement on a project or progress log carries an owner/author
//! predicate, so a request that slips past the API checks still cannot
//! touch another identity's rows.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable with a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Whether a sqlx error is a Postgres unique-constraint violation (23505).
///
/// The profile-ensure path treats this as benign: two concurrent sign-ins
/// may both observe a missing profile and both insert; the loser's
/// duplicate key is success, not a fault.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}
