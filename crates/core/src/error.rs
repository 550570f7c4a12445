use crate::types::DbId;

/// Domain error taxonomy.
///
/// Every failure an operation can produce maps onto one of these variants;
/// the API crate translates them to HTTP statuses. Validation failures are
/// raised before any statement is issued, so a rejected request never
/// mutates state.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A required field is empty or malformed (title, log content, month).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Unique-constraint style conflicts, e.g. an already-registered email.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials/token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not the owner/author of the target resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
