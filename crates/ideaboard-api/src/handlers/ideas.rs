//! Idea handlers
//!
//! Endpoints for the idea feed and idea votes.

use axum::{extract::State, Json};
use ideaboard_service::{
    CreateIdeaRequest, CreateIdeaResponse, IdeaEnvelope, IdeaListResponse, IdeaService,
    VoteRequest, VoteResponse, VoteService,
};

use crate::extractors::{
    AuthUser, FeedSort, IdeaIdPath, OptionalAuthUser, Pagination, SnowflakePath, ValidatedJson,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create idea
///
/// POST /ideas
pub async fn create_idea(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateIdeaRequest>,
) -> ApiResult<Created<Json<CreateIdeaResponse>>> {
    let service = IdeaService::new(state.service_context());
    let idea = service.create_idea(auth.user_id, request).await?;

    Ok(Created(Json(CreateIdeaResponse {
        idea,
        message: "Idea created successfully".to_string(),
    })))
}

/// List ideas
///
/// GET /ideas?sort=new|top
pub async fn list_ideas(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    FeedSort(sort): FeedSort,
    pagination: Pagination,
) -> ApiResult<Json<IdeaListResponse>> {
    let service = IdeaService::new(state.service_context());
    let page = service
        .list_ideas(sort, viewer.user_id(), pagination.into())
        .await?;
    Ok(Json(page.into()))
}

/// Get idea by ID
///
/// GET /ideas/{idea_id}
pub async fn get_idea(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<IdeaIdPath>,
) -> ApiResult<Json<IdeaEnvelope>> {
    let idea_id = path.idea_id()?;

    let service = IdeaService::new(state.service_context());
    let idea = service.get_idea(idea_id, viewer.user_id()).await?;
    Ok(Json(IdeaEnvelope { idea }))
}

/// Cast, switch or clear a vote on an idea
///
/// POST /ideas/{idea_id}/vote
pub async fn vote_idea(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<IdeaIdPath>,
    ValidatedJson(request): ValidatedJson<VoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let idea_id = path.idea_id()?;

    let service = VoteService::new(state.service_context());
    let response = service.vote_idea(idea_id, auth.user_id, request).await?;
    Ok(Json(response))
}
