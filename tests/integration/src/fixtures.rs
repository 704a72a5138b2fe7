//! Test fixtures and wire types
//!
//! Request bodies sent by tests and the response shapes they expect back.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Requests
// ============================================================================

/// Create idea request
#[derive(Debug, Serialize)]
pub struct CreateIdeaRequest {
    pub title: String,
    pub description: Option<String>,
}

impl CreateIdeaRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Test idea {suffix}"),
            description: Some("An idea for testing".to_string()),
        }
    }
}

/// Create comment request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    pub idea_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
}

impl CreateCommentRequest {
    pub fn top_level(idea_id: &str, content: &str) -> Self {
        Self {
            content: content.to_string(),
            idea_id: idea_id.to_string(),
            comment_id: None,
        }
    }

    pub fn reply(idea_id: &str, parent_id: &str, content: &str) -> Self {
        Self {
            content: content.to_string(),
            idea_id: idea_id.to_string(),
            comment_id: Some(parent_id.to_string()),
        }
    }
}

/// Edit comment request
#[derive(Debug, Serialize)]
pub struct EditCommentRequest {
    pub content: String,
}

/// Vote request; `None` serializes as `null` and clears the vote
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub vote_type: Option<String>,
}

impl VoteRequest {
    pub fn up() -> Self {
        Self {
            vote_type: Some("UP".to_string()),
        }
    }

    pub fn down() -> Self {
        Self {
            vote_type: Some("DOWN".to_string()),
        }
    }

    pub fn clear() -> Self {
        Self { vote_type: None }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaResponse {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub description: Option<String>,
    pub votes_count: i64,
    pub created_at: String,
    pub user_vote: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateIdeaResponse {
    pub idea: IdeaResponse,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct IdeaEnvelope {
    pub idea: IdeaResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaListResponse {
    pub ideas: Vec<IdeaResponse>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub idea_id: String,
    pub author_id: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub votes_count: i64,
    pub is_deleted: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub replies_count: i64,
    pub user_vote: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentResponse {
    pub comment: CommentResponse,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EditCommentResponse {
    pub success: bool,
    pub comment: CommentResponse,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteCommentResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyListResponse {
    pub replies: Vec<CommentResponse>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub success: bool,
    pub votes_count: i64,
    pub user_vote: Option<String>,
    pub message: String,
}
