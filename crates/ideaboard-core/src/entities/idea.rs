//! Idea entity - a post in the feed that comments and votes attach to

use chrono::{DateTime, Utc};

use super::now_micros;
use crate::error::DomainError;
use crate::value_objects::{SortKey, Snowflake};

pub const MAX_IDEA_TITLE_LENGTH: usize = 150;
pub const MAX_IDEA_DESCRIPTION_LENGTH: usize = 5000;

/// Idea entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Idea {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub title: String,
    pub description: Option<String>,
    pub votes_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Idea {
    /// Create a new Idea. Title and description must already be normalized.
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        title: String,
        description: Option<String>,
    ) -> Self {
        Self {
            id,
            author_id,
            title,
            description,
            votes_count: 0,
            created_at: now_micros(),
        }
    }

    #[inline]
    pub fn sort_key(&self) -> SortKey {
        SortKey::new(self.id, self.votes_count, self.created_at)
    }
}

pub fn normalize_idea_title(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::ValidationError("title must not be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_IDEA_TITLE_LENGTH {
        return Err(DomainError::ContentTooLong {
            max: MAX_IDEA_TITLE_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}

/// Trim the description; blank descriptions become `None`
pub fn normalize_idea_description(raw: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(trimmed) = raw.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };
    if trimmed.chars().count() > MAX_IDEA_DESCRIPTION_LENGTH {
        return Err(DomainError::ContentTooLong {
            max: MAX_IDEA_DESCRIPTION_LENGTH,
        });
    }
    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idea_creation() {
        let idea = Idea::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "Dark mode".to_string(),
            None,
        );
        assert_eq!(idea.votes_count, 0);
        assert_eq!(idea.sort_key().id, Snowflake::new(1));
    }

    #[test]
    fn test_title_rules() {
        assert_eq!(normalize_idea_title("  Dark mode ").unwrap(), "Dark mode");
        assert!(normalize_idea_title("   ").unwrap_err().is_validation());
        assert!(normalize_idea_title(&"x".repeat(151)).is_err());
        assert!(normalize_idea_title(&"x".repeat(150)).is_ok());
    }

    #[test]
    fn test_description_rules() {
        assert_eq!(normalize_idea_description(None).unwrap(), None);
        assert_eq!(normalize_idea_description(Some("  ")).unwrap(), None);
        assert_eq!(
            normalize_idea_description(Some(" why ")).unwrap().as_deref(),
            Some("why")
        );
        assert!(normalize_idea_description(Some(&"x".repeat(5001))).is_err());
    }
}
