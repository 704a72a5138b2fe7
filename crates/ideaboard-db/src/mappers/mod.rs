//! Entity to model mappers
//!
//! Conversions between domain entities (ideaboard-core) and database models.

mod comment;
mod idea;
mod vote;

pub use vote::parse_vote_type;
