//! Comment entity - a node in an idea's discussion tree

use chrono::{DateTime, Utc};

use super::now_micros;
use crate::error::DomainError;
use crate::value_objects::{SortKey, Snowflake};

/// Maximum comment length in characters, after trimming
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// Content a comment carries once soft-deleted
pub const DELETED_PLACEHOLDER: &str = "[deleted]";

/// Comment entity
///
/// Comments are never removed. A soft-deleted comment keeps its place in the
/// tree (and its votes) with its content replaced by [`DELETED_PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub idea_id: Snowflake,
    pub author_id: Snowflake,
    /// `None` for top-level comments. Never reassigned.
    pub parent_id: Option<Snowflake>,
    pub content: String,
    pub votes_count: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Create a new top-level comment. `content` must already be normalized.
    pub fn new(id: Snowflake, idea_id: Snowflake, author_id: Snowflake, content: String) -> Self {
        Self {
            id,
            idea_id,
            author_id,
            parent_id: None,
            content,
            votes_count: 0,
            is_deleted: false,
            created_at: now_micros(),
            updated_at: None,
        }
    }

    /// Create a reply under `parent`, inheriting its idea
    pub fn new_reply(id: Snowflake, parent: &Comment, author_id: Snowflake, content: String) -> Self {
        Self {
            parent_id: Some(parent.id),
            ..Self::new(id, parent.idea_id, author_id, content)
        }
    }

    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Ownership is checked before state
    pub fn ensure_editable_by(&self, user_id: Snowflake) -> Result<(), DomainError> {
        if !self.is_author(user_id) {
            return Err(DomainError::NotCommentAuthor);
        }
        if self.is_deleted {
            return Err(DomainError::CommentDeleted);
        }
        Ok(())
    }

    pub fn ensure_deletable_by(&self, user_id: Snowflake) -> Result<(), DomainError> {
        if !self.is_author(user_id) {
            return Err(DomainError::NotCommentAuthor);
        }
        if self.is_deleted {
            return Err(DomainError::CommentAlreadyDeleted);
        }
        Ok(())
    }

    /// Replace the content. Votes and creation time are untouched.
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Some(now_micros());
    }

    /// Irreversibly blank the comment, keeping its place in the tree
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.content = DELETED_PLACEHOLDER.to_string();
        self.updated_at = Some(now_micros());
    }

    #[inline]
    pub fn sort_key(&self) -> SortKey {
        SortKey::new(self.id, self.votes_count, self.created_at)
    }
}

/// A comment together with the number of its direct children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadedComment {
    pub comment: Comment,
    pub replies_count: i64,
}

impl ThreadedComment {
    pub fn new(comment: Comment, replies_count: i64) -> Self {
        Self {
            comment,
            replies_count,
        }
    }

    #[inline]
    pub fn sort_key(&self) -> SortKey {
        self.comment.sort_key()
    }
}

/// Trim and validate comment content
pub fn normalize_comment_content(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyContent);
    }
    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(DomainError::ContentTooLong {
            max: MAX_COMMENT_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}

/// Whether a comment appears in listings: live comments always do, deleted
/// ones only while at least one direct child row exists.
#[inline]
pub fn is_listable(is_deleted: bool, has_replies: bool) -> bool {
    !is_deleted || has_replies
}
