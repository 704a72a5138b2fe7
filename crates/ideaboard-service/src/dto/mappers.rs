//! Entity to DTO mappers
//!
//! The viewer's vote is not part of the entity, so mappers take it alongside.

use ideaboard_core::{Comment, Idea, Page, ThreadedComment, VoteType};

use super::responses::{
    CommentListResponse, CommentResponse, IdeaListResponse, IdeaResponse, ReplyListResponse,
};

// ============================================================================
// Comment Mappers
// ============================================================================

impl CommentResponse {
    pub fn from_comment(comment: Comment, replies_count: i64, user_vote: Option<VoteType>) -> Self {
        Self {
            id: comment.id.to_string(),
            idea_id: comment.idea_id.to_string(),
            author_id: comment.author_id.to_string(),
            parent_id: comment.parent_id.map(|id| id.to_string()),
            content: comment.content,
            votes_count: comment.votes_count,
            is_deleted: comment.is_deleted,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            replies_count,
            user_vote,
        }
    }

    pub fn from_threaded(threaded: ThreadedComment, user_vote: Option<VoteType>) -> Self {
        Self::from_comment(threaded.comment, threaded.replies_count, user_vote)
    }
}

impl From<Page<CommentResponse>> for CommentListResponse {
    fn from(page: Page<CommentResponse>) -> Self {
        Self {
            comments: page.items,
            next_cursor: page.next_cursor,
            has_more: page.has_more,
        }
    }
}

impl From<Page<CommentResponse>> for ReplyListResponse {
    fn from(page: Page<CommentResponse>) -> Self {
        Self {
            replies: page.items,
            has_more: page.has_more,
            next_cursor: page.next_cursor,
        }
    }
}

// ============================================================================
// Idea Mappers
// ============================================================================

impl IdeaResponse {
    pub fn from_idea(idea: Idea, user_vote: Option<VoteType>) -> Self {
        Self {
            id: idea.id.to_string(),
            author_id: idea.author_id.to_string(),
            title: idea.title,
            description: idea.description,
            votes_count: idea.votes_count,
            created_at: idea.created_at,
            user_vote,
        }
    }
}

impl From<Page<IdeaResponse>> for IdeaListResponse {
    fn from(page: Page<IdeaResponse>) -> Self {
        Self {
            ideas: page.items,
            next_cursor: page.next_cursor,
            has_more: page.has_more,
        }
    }
}
