//! Request DTOs for API endpoints
//!
//! Body DTOs implement `Deserialize` and `Validate`. Validation here only
//! covers presence; trimming and length limits are domain rules.

use std::str::FromStr;

use ideaboard_core::{ListingKind, Snowflake};
use serde::Deserialize;
use validator::Validate;

use crate::services::ServiceError;

// ============================================================================
// Comment Requests
// ============================================================================

/// Create a top-level comment, or a reply when `comment_id` names a parent
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    pub idea_id: Snowflake,

    /// Parent comment for replies
    #[serde(default)]
    pub comment_id: Option<Snowflake>,
}

/// Edit comment content
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

// ============================================================================
// Vote Requests
// ============================================================================

/// Cast, switch or clear a vote.
///
/// `voteType` is `"UP"`, `"DOWN"` or `null`; an absent field clears the vote.
/// Kept as a raw string so an unknown value surfaces as `INVALID_VOTE_TYPE`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(default)]
    pub vote_type: Option<String>,
}

// ============================================================================
// Idea Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateIdeaRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Feed ordering for `GET /ideas`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdeaSort {
    #[default]
    New,
    Top,
}

impl IdeaSort {
    pub fn listing_kind(self) -> ListingKind {
        match self {
            Self::New => ListingKind::IdeasNew,
            Self::Top => ListingKind::IdeasTop,
        }
    }
}

impl FromStr for IdeaSort {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "top" => Ok(Self::Top),
            other => Err(ServiceError::validation(format!(
                "sort must be 'new' or 'top', got '{other}'"
            ))),
        }
    }
}

// ============================================================================
// Listing Queries
// ============================================================================

/// Cursor and page size shared by every listing
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn new(cursor: Option<String>, limit: Option<i64>) -> Self {
        Self { cursor, limit }
    }
}
