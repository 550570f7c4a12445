//! Profile entity model.

use codeprogress_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `profiles` table. One per user, keyed by the user id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub full_name: String,
    pub created_at: Timestamp,
}
