//! Idea entity <-> model mapper

use ideaboard_core::entities::Idea;
use ideaboard_core::value_objects::Snowflake;

use crate::models::IdeaModel;

impl From<IdeaModel> for Idea {
    fn from(model: IdeaModel) -> Self {
        Idea {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            title: model.title,
            description: model.description,
            votes_count: model.votes_count,
            created_at: model.created_at,
        }
    }
}
