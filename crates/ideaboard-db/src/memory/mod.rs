//! In-memory store
//!
//! Implements every repository trait over process memory, guarded by a single
//! mutex so each operation is atomic the way a database transaction would be.
//! Backs the service tests and the HTTP integration harness.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use ideaboard_core::entities::{is_listable, Comment, Idea, ThreadedComment, Vote, VoteOutcome, VoteTransition};
use ideaboard_core::error::DomainError;
use ideaboard_core::traits::{CommentRepository, IdeaRepository, RepoResult, VoteRepository};
use ideaboard_core::value_objects::{
    LedgerOp, ListingKind, PageRequest, Snowflake, SortKey, VoteTarget, VoteTargetKind, VoteType,
};

#[derive(Debug, Default)]
struct State {
    ideas: HashMap<Snowflake, Idea>,
    comments: HashMap<Snowflake, Comment>,
    votes: HashMap<(Snowflake, VoteTarget), Vote>,
}

impl State {
    fn replies_count(&self, id: Snowflake) -> i64 {
        self.comments
            .values()
            .filter(|c| c.parent_id == Some(id))
            .count() as i64
    }

    fn counter_mut(&mut self, target: VoteTarget) -> Option<&mut i64> {
        match target {
            VoteTarget::Idea(id) => self.ideas.get_mut(&id).map(|i| &mut i.votes_count),
            VoteTarget::Comment(id) => self.comments.get_mut(&id).map(|c| &mut c.votes_count),
        }
    }

    /// Listable comments matching `scope`, ordered and cut after the cursor
    fn threaded_page<F>(&self, request: &PageRequest, scope: F) -> Vec<ThreadedComment>
    where
        F: Fn(&Comment) -> bool,
    {
        let mut children: HashMap<Snowflake, i64> = HashMap::new();
        for parent_id in self.comments.values().filter_map(|c| c.parent_id) {
            *children.entry(parent_id).or_default() += 1;
        }

        let rows = self
            .comments
            .values()
            .filter(|c| scope(c))
            .map(|c| {
                let replies_count = children.get(&c.id).copied().unwrap_or(0);
                ThreadedComment::new(c.clone(), replies_count)
            })
            .filter(|t| is_listable(t.comment.is_deleted, t.replies_count > 0))
            .collect();

        page_of(rows, request, ThreadedComment::sort_key)
    }
}

fn page_of<T, F>(mut rows: Vec<T>, request: &PageRequest, key: F) -> Vec<T>
where
    F: Fn(&T) -> SortKey,
{
    rows.sort_by(|a, b| request.kind.compare(&key(a), &key(b)));
    rows.into_iter()
        .filter(|row| request.cursor.map_or(true, |c| c.precedes(&key(row))))
        .take(request.fetch_limit() as usize)
        .collect()
}

/// Shared in-memory store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdeaRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Idea>> {
        Ok(self.state.lock().ideas.get(&id).cloned())
    }

    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        Ok(self.state.lock().ideas.contains_key(&id))
    }

    async fn create(&self, idea: &Idea) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.ideas.contains_key(&idea.id) {
            return Err(DomainError::DatabaseError(format!("duplicate idea id {}", idea.id)));
        }
        state.ideas.insert(idea.id, idea.clone());
        Ok(())
    }

    async fn list(&self, request: &PageRequest) -> RepoResult<Vec<Idea>> {
        if !matches!(request.kind, ListingKind::IdeasNew | ListingKind::IdeasTop) {
            return Err(DomainError::InternalError(format!(
                "idea feed cannot be listed as {}",
                request.kind.as_str()
            )));
        }
        let rows = self.state.lock().ideas.values().cloned().collect();
        Ok(page_of(rows, request, Idea::sort_key))
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.state.lock().comments.get(&id).cloned())
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let mut state = self.state.lock();
        if !state.ideas.contains_key(&comment.idea_id) {
            return Err(DomainError::IdeaNotFound(comment.idea_id));
        }
        if let Some(parent_id) = comment.parent_id {
            if !state.comments.contains_key(&parent_id) {
                return Err(DomainError::ParentCommentNotFound(parent_id));
            }
        }
        if state.comments.contains_key(&comment.id) {
            return Err(DomainError::DatabaseError(format!(
                "duplicate comment id {}",
                comment.id
            )));
        }
        state.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn update_content(
        &self,
        id: Snowflake,
        editor_id: Snowflake,
        content: &str,
    ) -> RepoResult<Comment> {
        let mut state = self.state.lock();
        let comment = state
            .comments
            .get_mut(&id)
            .ok_or(DomainError::CommentNotFound(id))?;
        comment.ensure_editable_by(editor_id)?;
        comment.edit(content.to_string());
        Ok(comment.clone())
    }

    async fn soft_delete(&self, id: Snowflake, actor_id: Snowflake) -> RepoResult<Comment> {
        let mut state = self.state.lock();
        let comment = state
            .comments
            .get_mut(&id)
            .ok_or(DomainError::CommentNotFound(id))?;
        comment.ensure_deletable_by(actor_id)?;
        comment.soft_delete();
        Ok(comment.clone())
    }

    async fn list_top_level(
        &self,
        idea_id: Snowflake,
        request: &PageRequest,
    ) -> RepoResult<Vec<ThreadedComment>> {
        let state = self.state.lock();
        Ok(state.threaded_page(request, |c| {
            c.idea_id == idea_id && c.parent_id.is_none()
        }))
    }

    async fn list_replies(
        &self,
        parent_id: Snowflake,
        request: &PageRequest,
    ) -> RepoResult<Vec<ThreadedComment>> {
        let state = self.state.lock();
        Ok(state.threaded_page(request, |c| c.parent_id == Some(parent_id)))
    }

    async fn replies_count(&self, id: Snowflake) -> RepoResult<i64> {
        Ok(self.state.lock().replies_count(id))
    }
}

#[async_trait]
impl VoteRepository for MemoryStore {
    async fn find(&self, voter_id: Snowflake, target: VoteTarget) -> RepoResult<Option<VoteType>> {
        Ok(self
            .state
            .lock()
            .votes
            .get(&(voter_id, target))
            .map(|v| v.vote_type))
    }

    async fn find_for_targets(
        &self,
        voter_id: Snowflake,
        kind: VoteTargetKind,
        target_ids: &[Snowflake],
    ) -> RepoResult<HashMap<Snowflake, VoteType>> {
        let state = self.state.lock();
        Ok(target_ids
            .iter()
            .filter_map(|&id| {
                let target = match kind {
                    VoteTargetKind::Idea => VoteTarget::Idea(id),
                    VoteTargetKind::Comment => VoteTarget::Comment(id),
                };
                state
                    .votes
                    .get(&(voter_id, target))
                    .map(|v| (id, v.vote_type))
            })
            .collect())
    }

    async fn apply(
        &self,
        voter_id: Snowflake,
        target: VoteTarget,
        desired: Option<VoteType>,
    ) -> RepoResult<VoteOutcome> {
        let mut state = self.state.lock();
        if state.counter_mut(target).is_none() {
            return Err(target.not_found());
        }

        let key = (voter_id, target);
        let existing = state.votes.get(&key).map(|v| v.vote_type);
        let transition = VoteTransition::new(existing, desired);

        match transition.ledger_op() {
            LedgerOp::Keep => {}
            LedgerOp::Insert(vote_type) => {
                state.votes.insert(key, Vote::new(voter_id, target, vote_type));
            }
            LedgerOp::Update(vote_type) => {
                if let Some(vote) = state.votes.get_mut(&key) {
                    vote.change(vote_type);
                }
            }
            LedgerOp::Delete => {
                state.votes.remove(&key);
            }
        }

        let delta = transition.delta();
        let counter = state.counter_mut(target).ok_or_else(|| target.not_found())?;
        *counter += delta;

        Ok(VoteOutcome {
            target,
            previous: existing,
            current: desired,
            delta,
            votes_count: *counter,
        })
    }

    async fn ledger_total(&self, target: VoteTarget) -> RepoResult<i64> {
        Ok(self
            .state
            .lock()
            .votes
            .values()
            .filter(|v| v.target == target)
            .map(|v| v.vote_type.weight())
            .sum())
    }
}
