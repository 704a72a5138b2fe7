//! Comment handlers
//!
//! Endpoints for comment threads and comment votes.

use axum::{extract::State, Json};
use ideaboard_service::{
    CommentListResponse, CommentService, CreateCommentRequest, CreateCommentResponse,
    DeleteCommentResponse, ReplyListResponse, UpdateCommentRequest, UpdateCommentResponse,
    VoteRequest, VoteResponse, VoteService,
};

use crate::extractors::{
    AuthUser, CommentIdPath, IdeaIdPath, OptionalAuthUser, Pagination, SnowflakePath,
    ValidatedJson,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create comment or reply
///
/// POST /comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CreateCommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comment = service.create_comment(auth.user_id, request).await?;

    let message = if comment.parent_id.is_some() {
        "Reply posted successfully"
    } else {
        "Comment posted successfully"
    };
    Ok(Created(Json(CreateCommentResponse {
        comment,
        message: message.to_string(),
    })))
}

/// Edit own comment
///
/// PATCH /comments/{comment_id}
pub async fn edit_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<CommentIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<UpdateCommentResponse>> {
    let comment_id = path.comment_id()?;

    let service = CommentService::new(state.service_context());
    let comment = service.edit_comment(comment_id, auth.user_id, request).await?;

    Ok(Json(UpdateCommentResponse {
        success: true,
        comment,
        message: "Comment updated successfully".to_string(),
    }))
}

/// Soft-delete own comment
///
/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<CommentIdPath>,
) -> ApiResult<Json<DeleteCommentResponse>> {
    let comment_id = path.comment_id()?;

    let service = CommentService::new(state.service_context());
    service.delete_comment(comment_id, auth.user_id).await?;

    Ok(Json(DeleteCommentResponse {
        success: true,
        message: "Comment deleted successfully".to_string(),
    }))
}

/// List top-level comments of an idea
///
/// GET /ideas/{idea_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<IdeaIdPath>,
    pagination: Pagination,
) -> ApiResult<Json<CommentListResponse>> {
    let idea_id = path.idea_id()?;

    let service = CommentService::new(state.service_context());
    let page = service
        .list_comments(idea_id, viewer.user_id(), pagination.into())
        .await?;
    Ok(Json(page.into()))
}

/// List direct replies to a comment
///
/// GET /comments/{comment_id}/replies
pub async fn list_replies(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<CommentIdPath>,
    pagination: Pagination,
) -> ApiResult<Json<ReplyListResponse>> {
    let comment_id = path.comment_id()?;

    let service = CommentService::new(state.service_context());
    let page = service
        .list_replies(comment_id, viewer.user_id(), pagination.into())
        .await?;
    Ok(Json(page.into()))
}

/// Cast, switch or clear a vote on a comment
///
/// POST /comments/{comment_id}/vote
pub async fn vote_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<CommentIdPath>,
    ValidatedJson(request): ValidatedJson<VoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let comment_id = path.comment_id()?;

    let service = VoteService::new(state.service_context());
    let response = service.vote_comment(comment_id, auth.user_id, request).await?;
    Ok(Json(response))
}
