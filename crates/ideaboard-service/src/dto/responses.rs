//! Response DTOs for API endpoints
//!
//! Field names are camelCase on the wire. IDs are serialized as strings.

use chrono::{DateTime, Utc};
use ideaboard_core::VoteType;
use serde::Serialize;

// ============================================================================
// Comment Responses
// ============================================================================

/// Comment as seen by a particular viewer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub idea_id: String,
    pub author_id: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub votes_count: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub replies_count: i64,
    /// The viewer's own vote; null for anonymous viewers
    pub user_vote: Option<VoteType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCommentResponse {
    pub comment: CommentResponse,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateCommentResponse {
    pub success: bool,
    pub comment: CommentResponse,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteCommentResponse {
    pub success: bool,
    pub message: String,
}

/// One page of top-level comments
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// One page of replies
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyListResponse {
    pub replies: Vec<CommentResponse>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

// ============================================================================
// Vote Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub success: bool,
    pub votes_count: i64,
    pub user_vote: Option<VoteType>,
    pub message: String,
}

// ============================================================================
// Idea Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaResponse {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub description: Option<String>,
    pub votes_count: i64,
    pub created_at: DateTime<Utc>,
    pub user_vote: Option<VoteType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateIdeaResponse {
    pub idea: IdeaResponse,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdeaEnvelope {
    pub idea: IdeaResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaListResponse {
    pub ideas: Vec<IdeaResponse>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
