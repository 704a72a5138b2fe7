//! Comment entity <-> model mapper

use ideaboard_core::entities::{Comment, ThreadedComment};
use ideaboard_core::value_objects::Snowflake;

use crate::models::{CommentModel, ThreadedCommentModel};

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            idea_id: Snowflake::new(model.idea_id),
            author_id: Snowflake::new(model.author_id),
            parent_id: model.parent_id.map(Snowflake::new),
            content: model.content,
            votes_count: model.votes_count,
            is_deleted: model.is_deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ThreadedCommentModel> for ThreadedComment {
    fn from(model: ThreadedCommentModel) -> Self {
        ThreadedComment::new(Comment::from(model.comment), model.replies_count)
    }
}
