//! # ideaboard-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! rules of the vote ledger, comment tree and cursor pagination.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    is_listable, normalize_comment_content, normalize_idea_description, normalize_idea_title,
    now_micros, Comment, Idea, ThreadedComment, Vote, VoteOutcome, VoteTransition, DELETED_PLACEHOLDER,
    MAX_COMMENT_LENGTH, MAX_IDEA_DESCRIPTION_LENGTH, MAX_IDEA_TITLE_LENGTH,
};
pub use error::DomainError;
pub use traits::{CommentRepository, IdeaRepository, RepoResult, VoteRepository};
pub use value_objects::{
    Cursor, LedgerOp, ListingKind, Page, PageRequest, Snowflake, SnowflakeGenerator,
    SnowflakeParseError, SortKey, VoteTarget, VoteTargetKind, VoteType,
};
