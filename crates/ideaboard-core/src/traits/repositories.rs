//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL, or the in-memory store used by tests).
//!
//! Listing methods return up to [`PageRequest::fetch_limit`] rows already in the
//! listing's order and strictly after the request's cursor; the caller turns
//! them into a [`Page`](crate::value_objects::Page).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::entities::{Comment, Idea, ThreadedComment, VoteOutcome};
use crate::error::DomainError;
use crate::value_objects::{PageRequest, Snowflake, VoteTarget, VoteTargetKind, VoteType};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Idea Repository
// ============================================================================

#[async_trait]
pub trait IdeaRepository: Send + Sync {
    /// Find idea by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Idea>>;

    /// Check whether an idea exists
    async fn exists(&self, id: Snowflake) -> RepoResult<bool>;

    /// Create a new idea
    async fn create(&self, idea: &Idea) -> RepoResult<()>;

    /// One page of the feed, ordered by `request.kind` (`IdeasNew` or `IdeasTop`)
    async fn list(&self, request: &PageRequest) -> RepoResult<Vec<Idea>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID, deleted or not
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Create a new comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Replace the content of a comment.
    ///
    /// Authorship and deletion state are re-checked under a row lock in the
    /// same transaction as the write.
    async fn update_content(
        &self,
        id: Snowflake,
        editor_id: Snowflake,
        content: &str,
    ) -> RepoResult<Comment>;

    /// Soft delete a comment, with the same locking as `update_content`
    async fn soft_delete(&self, id: Snowflake, actor_id: Snowflake) -> RepoResult<Comment>;

    /// Listable top-level comments of an idea
    async fn list_top_level(
        &self,
        idea_id: Snowflake,
        request: &PageRequest,
    ) -> RepoResult<Vec<ThreadedComment>>;

    /// Listable direct replies of a comment
    async fn list_replies(
        &self,
        parent_id: Snowflake,
        request: &PageRequest,
    ) -> RepoResult<Vec<ThreadedComment>>;

    /// Number of direct child rows, deleted or not
    async fn replies_count(&self, id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Vote Repository
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// The voter's current vote on a target
    async fn find(&self, voter_id: Snowflake, target: VoteTarget) -> RepoResult<Option<VoteType>>;

    /// The voter's current votes on many targets of one kind. Targets without a
    /// vote are absent from the map.
    async fn find_for_targets(
        &self,
        voter_id: Snowflake,
        kind: VoteTargetKind,
        target_ids: &[Snowflake],
    ) -> RepoResult<HashMap<Snowflake, VoteType>>;

    /// Move the voter's vote to `desired` and adjust the target's counter by
    /// the transition delta, atomically.
    ///
    /// Fails with the target's "not found" error when it does not exist.
    async fn apply(
        &self,
        voter_id: Snowflake,
        target: VoteTarget,
        desired: Option<VoteType>,
    ) -> RepoResult<VoteOutcome>;

    /// Net ledger value of a target (`UP` count minus `DOWN` count). Used to
    /// audit the denormalized counter.
    async fn ledger_total(&self, target: VoteTarget) -> RepoResult<i64>;
}
