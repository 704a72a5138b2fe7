//! Vote direction and vote target

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Direction of a single ledger entry. "No vote" is the absence of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    /// Contribution of one entry to the aggregate counter
    #[inline]
    pub const fn weight(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UP" => Ok(Self::Up),
            "DOWN" => Ok(Self::Down),
            other => Err(DomainError::InvalidVoteType(other.to_string())),
        }
    }
}

/// Ledger mutation required to move from one vote state to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOp {
    /// State unchanged, no write
    Keep,
    Insert(VoteType),
    Update(VoteType),
    Delete,
}

/// Kind of entity a vote is cast on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteTargetKind {
    Idea,
    Comment,
}

impl VoteTargetKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idea => "idea",
            Self::Comment => "comment",
        }
    }
}

/// A votable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteTarget {
    Idea(Snowflake),
    Comment(Snowflake),
}

impl VoteTarget {
    #[inline]
    pub const fn id(self) -> Snowflake {
        match self {
            Self::Idea(id) | Self::Comment(id) => id,
        }
    }

    #[inline]
    pub const fn kind(self) -> VoteTargetKind {
        match self {
            Self::Idea(_) => VoteTargetKind::Idea,
            Self::Comment(_) => VoteTargetKind::Comment,
        }
    }

    /// The "not found" error for this target
    pub fn not_found(self) -> DomainError {
        match self {
            Self::Idea(id) => DomainError::IdeaNotFound(id),
            Self::Comment(id) => DomainError::CommentNotFound(id),
        }
    }
}

impl fmt::Display for VoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind().as_str(), self.id())
    }
}
