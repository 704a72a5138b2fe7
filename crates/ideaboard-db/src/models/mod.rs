//! Database models
//!
//! Row types with SQLx `FromRow` derives, one per table (plus listing rows).

mod comment;
mod idea;
mod vote;

pub use comment::{CommentModel, ThreadedCommentModel};
pub use idea::IdeaModel;
pub use vote::TargetVoteModel;
