//! Idea database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for ideas table
#[derive(Debug, Clone, FromRow)]
pub struct IdeaModel {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub votes_count: i64,
    pub created_at: DateTime<Utc>,
}
