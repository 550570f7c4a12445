//! Project validation and the in-memory list filter.
//!
//! The list endpoint fetches the full project collection once (newest
//! first) and then narrows it with [`ProjectFilter`] -- filtering is pure
//! and never re-queries. The same rules back the create/update validation:
//! a title must survive trimming, and the tag set is normalised before it
//! ever reaches a statement.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum number of tags a project may carry.
pub const MAX_TAGS: usize = 5;

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Validate and trim a project title.
///
/// Returns the trimmed title. An empty-after-trim title is a validation
/// error; callers reject it before issuing any insert or update.
pub fn validate_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Project title must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Project title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Normalise a tag list: trim each tag, drop empties, drop duplicates
/// (keeping first occurrence order), and cap the result at [`MAX_TAGS`].
///
/// Adding a duplicate or a sixth tag is a no-op rather than an error, so
/// the stored tag set never exceeds the cap.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() || out.iter().any(|t| t == trimmed) {
            continue;
        }
        if out.len() == MAX_TAGS {
            break;
        }
        out.push(trimmed.to_string());
    }
    out
}

/// Trim an optional link field, mapping whitespace-only input to `None`.
pub fn normalize_link(link: Option<&str>) -> Option<String> {
    link.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Criteria applied, in order, to the fetched project list.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Case-insensitive substring match on the title.
    pub text: Option<String>,
    /// Every requested tag must be present (AND semantics). Empty matches all.
    pub tags: Vec<String>,
    /// Keep only projects owned by this identity.
    pub owner: Option<DbId>,
}

impl ProjectFilter {
    /// Decide whether a project with the given title, tags, and owner
    /// passes the filter.
    pub fn matches(&self, title: &str, tags: &[String], owner_id: DbId) -> bool {
        if let Some(ref text) = self.text {
            if !title.to_lowercase().contains(&text.to_lowercase()) {
                return false;
            }
        }
        if !self.tags.iter().all(|want| tags.iter().any(|t| t == want)) {
            return false;
        }
        if let Some(owner) = self.owner {
            if owner_id != owner {
                return false;
            }
        }
        true
    }
}
