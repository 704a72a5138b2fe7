//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use ideaboard_core::entities::{Comment, ThreadedComment};
use ideaboard_core::error::DomainError;
use ideaboard_core::traits::{CommentRepository, RepoResult};
use ideaboard_core::value_objects::{ListingKind, PageRequest, Snowflake};

use crate::models::{CommentModel, ThreadedCommentModel};

use super::error::{comment_not_found, map_db_error, map_fk_violation};
use super::keyset::{after_cursor, order_by, CursorBinds};

const COMMENT_COLUMNS: &str =
    "c.id, c.idea_id, c.author_id, c.parent_id, c.content, c.votes_count, c.is_deleted, c.created_at, c.updated_at";

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock a comment row for the rest of the transaction
    async fn lock(tx: &mut Transaction<'_, Postgres>, id: Snowflake) -> RepoResult<Comment> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments c WHERE c.id = $1 FOR UPDATE");
        let row = sqlx::query_as::<_, CommentModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&mut **tx)
            .await
            .map_err(map_db_error)?;

        row.map(Comment::from).ok_or_else(|| comment_not_found(id))
    }

    async fn store_content(
        tx: &mut Transaction<'_, Postgres>,
        comment: &Comment,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE comments
            SET content = $2, is_deleted = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(comment.id.into_inner())
        .bind(&comment.content)
        .bind(comment.is_deleted)
        .bind(comment.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    /// Listable comments under one scope (`c.idea_id` of top-level rows, or `c.parent_id`)
    async fn list_threaded(
        &self,
        scope: &str,
        scope_id: Snowflake,
        request: &PageRequest,
    ) -> RepoResult<Vec<ThreadedComment>> {
        let sql = format!(
            r#"
            SELECT {COMMENT_COLUMNS},
                   (SELECT COUNT(*) FROM comments r WHERE r.parent_id = c.id) AS replies_count
            FROM comments c
            WHERE {scope}
              AND (c.is_deleted = FALSE OR EXISTS (SELECT 1 FROM comments r WHERE r.parent_id = c.id))
              AND {after}
            ORDER BY {order}
            LIMIT $5
            "#,
            after = after_cursor(request.kind, "c", 2),
            order = order_by(request.kind, "c"),
        );

        let cursor = CursorBinds::of(request);
        let rows = sqlx::query_as::<_, ThreadedCommentModel>(&sql)
            .bind(scope_id.into_inner())
            .bind(cursor.votes_count)
            .bind(cursor.created_at)
            .bind(cursor.id)
            .bind(request.fetch_limit())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ThreadedComment::from).collect())
    }
}

fn expect_kind(request: &PageRequest, expected: ListingKind) -> RepoResult<()> {
    if request.kind == expected {
        Ok(())
    } else {
        Err(DomainError::InternalError(format!(
            "expected a {} request, got {}",
            expected.as_str(),
            request.kind.as_str()
        )))
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments c WHERE c.id = $1");
        let result = sqlx::query_as::<_, CommentModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id, idea_id = %comment.idea_id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, idea_id, author_id, parent_id, content, votes_count, is_deleted, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(comment.id.into_inner())
        .bind(comment.idea_id.into_inner())
        .bind(comment.author_id.into_inner())
        .bind(comment.parent_id.map(Snowflake::into_inner))
        .bind(&comment.content)
        .bind(comment.votes_count)
        .bind(comment.is_deleted)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_fk_violation(e, || match comment.parent_id {
                Some(parent_id) => DomainError::ParentCommentNotFound(parent_id),
                None => DomainError::IdeaNotFound(comment.idea_id),
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, content))]
    async fn update_content(
        &self,
        id: Snowflake,
        editor_id: Snowflake,
        content: &str,
    ) -> RepoResult<Comment> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let mut comment = Self::lock(&mut tx, id).await?;
        comment.ensure_editable_by(editor_id)?;
        comment.edit(content.to_string());
        Self::store_content(&mut tx, &comment).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(comment)
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: Snowflake, actor_id: Snowflake) -> RepoResult<Comment> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let mut comment = Self::lock(&mut tx, id).await?;
        comment.ensure_deletable_by(actor_id)?;
        comment.soft_delete();
        Self::store_content(&mut tx, &comment).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(comment)
    }

    #[instrument(skip(self))]
    async fn list_top_level(
        &self,
        idea_id: Snowflake,
        request: &PageRequest,
    ) -> RepoResult<Vec<ThreadedComment>> {
        expect_kind(request, ListingKind::TopLevelComments)?;
        self.list_threaded("c.idea_id = $1 AND c.parent_id IS NULL", idea_id, request)
            .await
    }

    #[instrument(skip(self))]
    async fn list_replies(
        &self,
        parent_id: Snowflake,
        request: &PageRequest,
    ) -> RepoResult<Vec<ThreadedComment>> {
        expect_kind(request, ListingKind::Replies)?;
        self.list_threaded("c.parent_id = $1", parent_id, request)
            .await
    }

    #[instrument(skip(self))]
    async fn replies_count(&self, id: Snowflake) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE parent_id = $1")
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCommentRepository>();
    }

    #[test]
    fn test_kind_guard() {
        let request = PageRequest::first(ListingKind::Replies);
        assert!(expect_kind(&request, ListingKind::Replies).is_ok());
        assert!(expect_kind(&request, ListingKind::TopLevelComments).is_err());
    }
}
