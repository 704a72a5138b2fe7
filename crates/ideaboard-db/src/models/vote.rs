//! Vote ledger model
//!
//! Both ledgers (`idea_votes`, `comment_votes`) are read through this shape;
//! the target column is aliased to `target_id` when selected.

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TargetVoteModel {
    pub target_id: i64,
    pub vote_type: String,
}
