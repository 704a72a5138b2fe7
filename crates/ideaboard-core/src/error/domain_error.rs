//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Idea not found: {0}")]
    IdeaNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Parent comment not found: {0}")]
    ParentCommentNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content must not be empty")]
    EmptyContent,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Parent comment belongs to a different idea")]
    ParentIdeaMismatch,

    #[error("Deleted comments cannot be edited")]
    CommentDeleted,

    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    #[error("Invalid vote type: {0}")]
    InvalidVoteType(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not comment author")]
    NotCommentAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Comment is already deleted")]
    CommentAlreadyDeleted,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::IdeaNotFound(_) => "UNKNOWN_IDEA",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::ParentCommentNotFound(_) => "UNKNOWN_PARENT_COMMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyContent => "EMPTY_CONTENT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::ParentIdeaMismatch => "PARENT_IDEA_MISMATCH",
            Self::CommentDeleted => "COMMENT_DELETED",
            Self::InvalidCursor(_) => "INVALID_CURSOR",
            Self::InvalidVoteType(_) => "INVALID_VOTE_TYPE",

            // Authorization
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",

            // Conflict
            Self::CommentAlreadyDeleted => "COMMENT_ALREADY_DELETED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::IdeaNotFound(_) | Self::CommentNotFound(_) | Self::ParentCommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyContent
                | Self::ContentTooLong { .. }
                | Self::ParentIdeaMismatch
                | Self::CommentDeleted
                | Self::InvalidCursor(_)
                | Self::InvalidVoteType(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotCommentAuthor)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::CommentAlreadyDeleted)
    }
}

impl From<crate::value_objects::SnowflakeParseError> for DomainError {
    fn from(err: crate::value_objects::SnowflakeParseError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
