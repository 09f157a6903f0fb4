use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum category slug length.
pub const SLUG_MAX_LEN: usize = 64;

/// Category entity - a classification dimension for posts.
///
/// Unpublishing a category hides every post filed under it from
/// non-author viewers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(title: String, description: String, slug: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            slug,
            is_published: true,
            created_at: Utc::now(),
        }
    }
}

/// Slugs: 1..=64 chars of lowercase ASCII letters, digits, `-` and `_`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= SLUG_MAX_LEN
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_slugs() {
        assert!(is_valid_slug("travel"));
        assert!(is_valid_slug("city-life_2024"));
    }

    #[test]
    fn rejects_bad_slugs() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Has-Caps"));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug(&"s".repeat(SLUG_MAX_LEN + 1)));
    }
}
