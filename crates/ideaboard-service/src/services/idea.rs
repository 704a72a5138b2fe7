//! Idea service

use ideaboard_core::{
    normalize_idea_description, normalize_idea_title, DomainError, Idea, Page, PageRequest,
    Snowflake, VoteTarget, VoteTargetKind,
};
use tracing::{info, instrument};

use crate::dto::{CreateIdeaRequest, IdeaResponse, IdeaSort, ListQuery};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::vote::VoteService;

/// Idea service
pub struct IdeaService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IdeaService<'a> {
    /// Create a new IdeaService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish a new idea
    #[instrument(skip(self, request))]
    pub async fn create_idea(
        &self,
        author_id: Snowflake,
        request: CreateIdeaRequest,
    ) -> ServiceResult<IdeaResponse> {
        let title = normalize_idea_title(&request.title)?;
        let description = normalize_idea_description(request.description.as_deref())?;

        let idea = Idea::new(self.ctx.generate_id(), author_id, title, description);
        self.ctx.idea_repo().create(&idea).await?;

        info!(idea_id = %idea.id, author_id = %author_id, "Idea created");

        Ok(IdeaResponse::from_idea(idea, None))
    }

    /// Get one idea with the viewer's vote
    #[instrument(skip(self))]
    pub async fn get_idea(
        &self,
        idea_id: Snowflake,
        viewer_id: Option<Snowflake>,
    ) -> ServiceResult<IdeaResponse> {
        let idea = self
            .ctx
            .idea_repo()
            .find_by_id(idea_id)
            .await?
            .ok_or(DomainError::IdeaNotFound(idea_id))?;

        let user_vote = VoteService::new(self.ctx)
            .user_vote(viewer_id, VoteTarget::Idea(idea_id))
            .await?;

        Ok(IdeaResponse::from_idea(idea, user_vote))
    }

    /// The idea feed, newest or top voted first
    #[instrument(skip(self, query))]
    pub async fn list_ideas(
        &self,
        sort: IdeaSort,
        viewer_id: Option<Snowflake>,
        query: ListQuery,
    ) -> ServiceResult<Page<IdeaResponse>> {
        let request = PageRequest::new(sort.listing_kind(), query.cursor.as_deref(), query.limit)?;

        let rows = self.ctx.idea_repo().list(&request).await?;
        let page = Page::from_overfetch(rows, &request, Idea::sort_key);

        let ids: Vec<Snowflake> = page.items.iter().map(|idea| idea.id).collect();
        let votes = VoteService::new(self.ctx)
            .user_votes(viewer_id, VoteTargetKind::Idea, &ids)
            .await?;

        Ok(page.map(|idea| {
            let user_vote = votes.get(&idea.id).copied();
            IdeaResponse::from_idea(idea, user_vote)
        }))
    }
}
