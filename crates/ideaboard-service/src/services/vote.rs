//! Vote service
//!
//! Applies UP/DOWN/clear votes to ideas and comments and resolves the
//! viewer's own votes for listings.

use std::collections::HashMap;
use std::str::FromStr;

use ideaboard_core::{Snowflake, VoteOutcome, VoteTarget, VoteTargetKind, VoteType};
use tracing::{info, instrument};

use crate::dto::{VoteRequest, VoteResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Vote on a comment
    pub async fn vote_comment(
        &self,
        comment_id: Snowflake,
        voter_id: Snowflake,
        request: VoteRequest,
    ) -> ServiceResult<VoteResponse> {
        self.vote(VoteTarget::Comment(comment_id), voter_id, request)
            .await
    }

    /// Vote on an idea
    pub async fn vote_idea(
        &self,
        idea_id: Snowflake,
        voter_id: Snowflake,
        request: VoteRequest,
    ) -> ServiceResult<VoteResponse> {
        self.vote(VoteTarget::Idea(idea_id), voter_id, request).await
    }

    async fn vote(
        &self,
        target: VoteTarget,
        voter_id: Snowflake,
        request: VoteRequest,
    ) -> ServiceResult<VoteResponse> {
        let desired = parse_vote_type(request.vote_type.as_deref())?;
        let outcome = self.apply(target, voter_id, desired).await?;

        let message = match (outcome.previous, outcome.current) {
            (_, None) => "Vote removed",
            (None, Some(_)) => "Vote recorded",
            (Some(prev), Some(cur)) if prev == cur => "Vote unchanged",
            (Some(_), Some(_)) => "Vote changed",
        };

        Ok(VoteResponse {
            success: true,
            votes_count: outcome.votes_count,
            user_vote: outcome.current,
            message: message.to_string(),
        })
    }

    /// Set the voter's vote on a target to `desired` (`None` clears it).
    ///
    /// Repeating the same call leaves the counter unchanged.
    #[instrument(skip(self))]
    pub async fn apply(
        &self,
        target: VoteTarget,
        voter_id: Snowflake,
        desired: Option<VoteType>,
    ) -> ServiceResult<VoteOutcome> {
        let outcome = self.ctx.vote_repo().apply(voter_id, target, desired).await?;

        info!(
            target = %target,
            voter_id = %voter_id,
            delta = outcome.delta,
            votes_count = outcome.votes_count,
            "Vote applied"
        );

        Ok(outcome)
    }

    /// The viewer's votes on a set of targets. Anonymous viewers have none.
    pub async fn user_votes(
        &self,
        viewer_id: Option<Snowflake>,
        kind: VoteTargetKind,
        target_ids: &[Snowflake],
    ) -> ServiceResult<HashMap<Snowflake, VoteType>> {
        match viewer_id {
            Some(viewer) if !target_ids.is_empty() => Ok(self
                .ctx
                .vote_repo()
                .find_for_targets(viewer, kind, target_ids)
                .await?),
            _ => Ok(HashMap::new()),
        }
    }

    /// The viewer's vote on one target
    pub async fn user_vote(
        &self,
        viewer_id: Option<Snowflake>,
        target: VoteTarget,
    ) -> ServiceResult<Option<VoteType>> {
        match viewer_id {
            Some(viewer) => Ok(self.ctx.vote_repo().find(viewer, target).await?),
            None => Ok(None),
        }
    }

    /// Difference between the stored counter and the ledger sum.
    /// Zero whenever the store is consistent.
    pub async fn counter_drift(&self, target: VoteTarget) -> ServiceResult<i64> {
        let counter = match target {
            VoteTarget::Idea(id) => self
                .ctx
                .idea_repo()
                .find_by_id(id)
                .await?
                .map(|idea| idea.votes_count),
            VoteTarget::Comment(id) => self
                .ctx
                .comment_repo()
                .find_by_id(id)
                .await?
                .map(|comment| comment.votes_count),
        }
        .ok_or_else(|| target.not_found())?;

        let ledger = self.ctx.vote_repo().ledger_total(target).await?;
        Ok(counter - ledger)
    }
}

/// `"UP"`/`"DOWN"` to a vote, absent or null to a clear
fn parse_vote_type(raw: Option<&str>) -> ServiceResult<Option<VoteType>> {
    raw.map(VoteType::from_str).transpose().map_err(Into::into)
}
