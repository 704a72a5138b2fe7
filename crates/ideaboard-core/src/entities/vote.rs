//! Vote ledger entry and the transition rules of the aggregate counter

use chrono::{DateTime, Utc};

use super::now_micros;
use crate::value_objects::{LedgerOp, Snowflake, VoteTarget, VoteType};

/// One voter's single-slot vote on one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub voter_id: Snowflake,
    pub target: VoteTarget,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(voter_id: Snowflake, target: VoteTarget, vote_type: VoteType) -> Self {
        let now = now_micros();
        Self {
            voter_id,
            target,
            vote_type,
            created_at: now,
            updated_at: now,
        }
    }

    /// Flip the direction in place
    pub fn change(&mut self, vote_type: VoteType) {
        self.vote_type = vote_type;
        self.updated_at = now_micros();
    }
}

/// Move from an observed vote state to a desired one
///
/// | existing | desired | delta | ledger    |
/// |----------|---------|-------|-----------|
/// | none     | UP      | +1    | insert    |
/// | none     | DOWN    | -1    | insert    |
/// | UP       | DOWN    | -2    | update    |
/// | DOWN     | UP      | +2    | update    |
/// | UP       | none    | -1    | delete    |
/// | DOWN     | none    | +1    | delete    |
/// | X        | X       | 0     | keep      |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTransition {
    pub existing: Option<VoteType>,
    pub desired: Option<VoteType>,
}

impl VoteTransition {
    pub const fn new(existing: Option<VoteType>, desired: Option<VoteType>) -> Self {
        Self { existing, desired }
    }

    /// Change to apply to the aggregate counter
    pub fn delta(&self) -> i64 {
        let weight = |v: Option<VoteType>| v.map_or(0, VoteType::weight);
        weight(self.desired) - weight(self.existing)
    }

    pub fn ledger_op(&self) -> LedgerOp {
        match (self.existing, self.desired) {
            (existing, desired) if existing == desired => LedgerOp::Keep,
            (None, Some(v)) => LedgerOp::Insert(v),
            (Some(_), Some(v)) => LedgerOp::Update(v),
            (Some(_), None) => LedgerOp::Delete,
            (None, None) => LedgerOp::Keep,
        }
    }

    #[inline]
    pub fn is_noop(&self) -> bool {
        self.existing == self.desired
    }
}

/// Result of applying a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    pub target: VoteTarget,
    pub previous: Option<VoteType>,
    pub current: Option<VoteType>,
    pub delta: i64,
    /// Counter value after the transaction committed
    pub votes_count: i64,
}
