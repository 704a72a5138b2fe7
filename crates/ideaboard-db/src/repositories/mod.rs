//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in ideaboard-core.

mod comment;
mod error;
mod idea;
mod keyset;
mod vote;

pub use comment::PgCommentRepository;
pub use idea::PgIdeaRepository;
pub use vote::PgVoteRepository;
