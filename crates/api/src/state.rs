use std::sync::Arc;

use crate::config::ServerConfig;
use crate::email::Mailer;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`. Cheaply cloneable (inner data is behind `Arc` or is
/// already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: codeprogress_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Outbound mail for sign-up confirmations (logs links in dev).
    pub mailer: Arc<Mailer>,
}
