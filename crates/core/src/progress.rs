//! Progress log validation.

use crate::error::CoreError;

/// Maximum length of a progress log in characters.
pub const MAX_CONTENT_LENGTH: usize = 10_000;

/// Validate progress log content.
///
/// Content must be non-empty after trimming. Only the emptiness check
/// trims; the content itself is stored as typed, since whitespace and
/// inner formatting belong to the author.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Progress log content must not be empty".into(),
        ));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Progress log content must be at most {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}
