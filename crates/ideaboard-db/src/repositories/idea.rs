//! PostgreSQL implementation of IdeaRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ideaboard_core::entities::Idea;
use ideaboard_core::error::DomainError;
use ideaboard_core::traits::{IdeaRepository, RepoResult};
use ideaboard_core::value_objects::{ListingKind, PageRequest, Snowflake};

use crate::models::IdeaModel;

use super::error::map_db_error;
use super::keyset::{after_cursor, order_by, CursorBinds};

/// PostgreSQL implementation of IdeaRepository
#[derive(Clone)]
pub struct PgIdeaRepository {
    pool: PgPool,
}

impl PgIdeaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdeaRepository for PgIdeaRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Idea>> {
        let result = sqlx::query_as::<_, IdeaModel>(
            r#"
            SELECT id, author_id, title, description, votes_count, created_at
            FROM ideas
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Idea::from))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM ideas WHERE id = $1)")
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self, idea), fields(idea_id = %idea.id))]
    async fn create(&self, idea: &Idea) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO ideas (id, author_id, title, description, votes_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(idea.id.into_inner())
        .bind(idea.author_id.into_inner())
        .bind(&idea.title)
        .bind(idea.description.as_deref())
        .bind(idea.votes_count)
        .bind(idea.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, request: &PageRequest) -> RepoResult<Vec<Idea>> {
        if !matches!(request.kind, ListingKind::IdeasNew | ListingKind::IdeasTop) {
            return Err(DomainError::InternalError(format!(
                "idea feed cannot be listed as {}",
                request.kind.as_str()
            )));
        }

        let sql = format!(
            r#"
            SELECT i.id, i.author_id, i.title, i.description, i.votes_count, i.created_at
            FROM ideas i
            WHERE {after}
            ORDER BY {order}
            LIMIT $4
            "#,
            after = after_cursor(request.kind, "i", 1),
            order = order_by(request.kind, "i"),
        );

        let cursor = CursorBinds::of(request);
        let rows = sqlx::query_as::<_, IdeaModel>(&sql)
            .bind(cursor.votes_count)
            .bind(cursor.created_at)
            .bind(cursor.id)
            .bind(request.fetch_limit())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Idea::from).collect())
    }
}
