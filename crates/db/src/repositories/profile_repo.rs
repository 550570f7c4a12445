//! Repository for the `profiles` table.

use codeprogress_core::types::DbId;
use sqlx::PgPool;

use crate::is_unique_violation;
use crate::models::profile::Profile;

const COLUMNS: &str = "id, full_name, created_at";

/// Provides lookup and the idempotent ensure operation for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find a profile by its user id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Ensure a profile row exists for the given user.
    ///
    /// Read-then-insert: only inserts when the lookup comes back empty.
    /// Two concurrent sign-ins can both observe the gap and both insert;
    /// the loser's unique violation is treated as success since the row it
    /// wanted now exists.
    pub async fn ensure(pool: &PgPool, id: DbId, full_name: &str) -> Result<(), sqlx::Error> {
        if Self::find_by_id(pool, id).await?.is_some() {
            return Ok(());
        }

        let result = sqlx::query("INSERT INTO profiles (id, full_name) VALUES ($1, $2)")
            .bind(id)
            .bind(full_name)
            .execute(pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                tracing::debug!(user_id = id, "Profile already created concurrently");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
