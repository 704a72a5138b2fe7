//! Comment service
//!
//! Handles comment creation, editing, soft deletion and threaded listings.

use ideaboard_core::{
    normalize_comment_content, Comment, DomainError, ListingKind, Page, PageRequest, Snowflake,
    ThreadedComment, VoteTarget, VoteTargetKind,
};
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CreateCommentRequest, ListQuery, UpdateCommentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::vote::VoteService;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a top-level comment, or a reply when the request names a parent.
    ///
    /// A reply must live on the same idea as its parent. Replying to a
    /// deleted parent is allowed.
    #[instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        author_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let content = normalize_comment_content(&request.content)?;

        if !self.ctx.idea_repo().exists(request.idea_id).await? {
            return Err(DomainError::IdeaNotFound(request.idea_id).into());
        }

        let id = self.ctx.generate_id();
        let comment = match request.comment_id {
            Some(parent_id) => {
                let parent = self
                    .ctx
                    .comment_repo()
                    .find_by_id(parent_id)
                    .await?
                    .ok_or(DomainError::ParentCommentNotFound(parent_id))?;

                if parent.idea_id != request.idea_id {
                    return Err(DomainError::ParentIdeaMismatch.into());
                }
                Comment::new_reply(id, &parent, author_id, content)
            }
            None => Comment::new(id, request.idea_id, author_id, content),
        };

        self.ctx.comment_repo().create(&comment).await?;

        info!(
            comment_id = %comment.id,
            idea_id = %comment.idea_id,
            parent_id = ?comment.parent_id,
            author_id = %author_id,
            "Comment created"
        );

        Ok(CommentResponse::from_comment(comment, 0, None))
    }

    /// Replace the content of the caller's own comment
    #[instrument(skip(self, request))]
    pub async fn edit_comment(
        &self,
        comment_id: Snowflake,
        user_id: Snowflake,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let content = normalize_comment_content(&request.content)?;

        let comment = self
            .ctx
            .comment_repo()
            .update_content(comment_id, user_id, &content)
            .await?;

        info!(comment_id = %comment_id, user_id = %user_id, "Comment edited");

        self.present(comment, Some(user_id)).await
    }

    /// Soft-delete the caller's own comment. Votes and replies are kept.
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, comment_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx.comment_repo().soft_delete(comment_id, user_id).await?;

        info!(comment_id = %comment_id, user_id = %user_id, "Comment deleted");

        Ok(())
    }

    /// Top-level comments of an idea, highest voted first
    #[instrument(skip(self, query))]
    pub async fn list_comments(
        &self,
        idea_id: Snowflake,
        viewer_id: Option<Snowflake>,
        query: ListQuery,
    ) -> ServiceResult<Page<CommentResponse>> {
        let request = PageRequest::new(
            ListingKind::TopLevelComments,
            query.cursor.as_deref(),
            query.limit,
        )?;

        if !self.ctx.idea_repo().exists(idea_id).await? {
            return Err(DomainError::IdeaNotFound(idea_id).into());
        }

        let rows = self.ctx.comment_repo().list_top_level(idea_id, &request).await?;
        self.paginate(rows, &request, viewer_id).await
    }

    /// Direct replies to a comment, highest voted first then oldest first
    #[instrument(skip(self, query))]
    pub async fn list_replies(
        &self,
        comment_id: Snowflake,
        viewer_id: Option<Snowflake>,
        query: ListQuery,
    ) -> ServiceResult<Page<CommentResponse>> {
        let request =
            PageRequest::new(ListingKind::Replies, query.cursor.as_deref(), query.limit)?;

        if self.ctx.comment_repo().find_by_id(comment_id).await?.is_none() {
            return Err(DomainError::CommentNotFound(comment_id).into());
        }

        let rows = self.ctx.comment_repo().list_replies(comment_id, &request).await?;
        self.paginate(rows, &request, viewer_id).await
    }

    async fn paginate(
        &self,
        rows: Vec<ThreadedComment>,
        request: &PageRequest,
        viewer_id: Option<Snowflake>,
    ) -> ServiceResult<Page<CommentResponse>> {
        let page = Page::from_overfetch(rows, request, ThreadedComment::sort_key);

        let ids: Vec<Snowflake> = page.items.iter().map(|row| row.comment.id).collect();
        let votes = VoteService::new(self.ctx)
            .user_votes(viewer_id, VoteTargetKind::Comment, &ids)
            .await?;

        Ok(page.map(|row| {
            let user_vote = votes.get(&row.comment.id).copied();
            CommentResponse::from_threaded(row, user_vote)
        }))
    }

    async fn present(
        &self,
        comment: Comment,
        viewer_id: Option<Snowflake>,
    ) -> ServiceResult<CommentResponse> {
        let replies_count = self.ctx.comment_repo().replies_count(comment.id).await?;
        let user_vote = VoteService::new(self.ctx)
            .user_vote(viewer_id, VoteTarget::Comment(comment.id))
            .await?;
        Ok(CommentResponse::from_comment(comment, replies_count, user_vote))
    }
}
