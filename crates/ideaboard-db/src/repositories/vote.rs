//! PostgreSQL implementation of VoteRepository
//!
//! A vote is applied in one transaction: the voter's ledger row is read under a
//! row lock, the ledger is written according to the transition, and the
//! target's counter is moved by the transition delta with an in-place
//! increment. Two first votes by the same voter race on the primary key; the
//! loser re-reads the winner's row and recomputes its transition.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use ideaboard_core::entities::{VoteOutcome, VoteTransition};
use ideaboard_core::error::DomainError;
use ideaboard_core::traits::{RepoResult, VoteRepository};
use ideaboard_core::value_objects::{LedgerOp, Snowflake, VoteTarget, VoteTargetKind, VoteType};

use crate::mappers::parse_vote_type;
use crate::models::TargetVoteModel;

use super::error::map_db_error;

/// Attempts at inserting a first vote before giving up
const MAX_INSERT_ATTEMPTS: u32 = 3;

/// Table layout of one vote ledger and the counter it feeds
#[derive(Debug, Clone, Copy)]
struct Ledger {
    table: &'static str,
    target_column: &'static str,
    counter_table: &'static str,
}

impl Ledger {
    const fn of(kind: VoteTargetKind) -> Self {
        match kind {
            VoteTargetKind::Idea => Self {
                table: "idea_votes",
                target_column: "idea_id",
                counter_table: "ideas",
            },
            VoteTargetKind::Comment => Self {
                table: "comment_votes",
                target_column: "comment_id",
                counter_table: "comments",
            },
        }
    }
}

/// PostgreSQL implementation of VoteRepository
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn lock_vote(
        tx: &mut Transaction<'_, Postgres>,
        ledger: Ledger,
        voter_id: Snowflake,
        target_id: Snowflake,
    ) -> RepoResult<Option<VoteType>> {
        let sql = format!(
            "SELECT {col} AS target_id, vote_type FROM {table} \
             WHERE user_id = $1 AND {col} = $2 FOR UPDATE",
            col = ledger.target_column,
            table = ledger.table,
        );
        let row = sqlx::query_as::<_, TargetVoteModel>(&sql)
            .bind(voter_id.into_inner())
            .bind(target_id.into_inner())
            .fetch_optional(&mut **tx)
            .await
            .map_err(map_db_error)?;

        row.map(|r| parse_vote_type(&r.vote_type)).transpose()
    }

    /// Returns false when another transaction inserted the row first
    async fn insert_vote(
        tx: &mut Transaction<'_, Postgres>,
        ledger: Ledger,
        voter_id: Snowflake,
        target_id: Snowflake,
        vote_type: VoteType,
    ) -> RepoResult<bool> {
        let sql = format!(
            "INSERT INTO {table} (user_id, {col}, vote_type) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, {col}) DO NOTHING",
            col = ledger.target_column,
            table = ledger.table,
        );
        let result = sqlx::query(&sql)
            .bind(voter_id.into_inner())
            .bind(target_id.into_inner())
            .bind(vote_type.as_str())
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_vote(
        tx: &mut Transaction<'_, Postgres>,
        ledger: Ledger,
        voter_id: Snowflake,
        target_id: Snowflake,
        vote_type: VoteType,
    ) -> RepoResult<()> {
        let sql = format!(
            "UPDATE {table} SET vote_type = $3, updated_at = NOW() \
             WHERE user_id = $1 AND {col} = $2",
            col = ledger.target_column,
            table = ledger.table,
        );
        sqlx::query(&sql)
            .bind(voter_id.into_inner())
            .bind(target_id.into_inner())
            .bind(vote_type.as_str())
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    async fn delete_vote(
        tx: &mut Transaction<'_, Postgres>,
        ledger: Ledger,
        voter_id: Snowflake,
        target_id: Snowflake,
    ) -> RepoResult<()> {
        let sql = format!(
            "DELETE FROM {table} WHERE user_id = $1 AND {col} = $2",
            col = ledger.target_column,
            table = ledger.table,
        );
        sqlx::query(&sql)
            .bind(voter_id.into_inner())
            .bind(target_id.into_inner())
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    /// Write the ledger side of a vote, returning the transition actually applied
    async fn write_ledger(
        tx: &mut Transaction<'_, Postgres>,
        ledger: Ledger,
        voter_id: Snowflake,
        target_id: Snowflake,
        desired: Option<VoteType>,
    ) -> RepoResult<VoteTransition> {
        for _ in 0..MAX_INSERT_ATTEMPTS {
            let existing = Self::lock_vote(tx, ledger, voter_id, target_id).await?;
            let transition = VoteTransition::new(existing, desired);

            match transition.ledger_op() {
                LedgerOp::Keep => {}
                LedgerOp::Insert(vote_type) => {
                    if !Self::insert_vote(tx, ledger, voter_id, target_id, vote_type).await? {
                        debug!(%voter_id, %target_id, "concurrent first vote, re-reading ledger");
                        continue;
                    }
                }
                LedgerOp::Update(vote_type) => {
                    Self::update_vote(tx, ledger, voter_id, target_id, vote_type).await?;
                }
                LedgerOp::Delete => {
                    Self::delete_vote(tx, ledger, voter_id, target_id).await?;
                }
            }

            return Ok(transition);
        }

        Err(DomainError::DatabaseError(format!(
            "vote by {voter_id} on {target_id} kept conflicting"
        )))
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self))]
    async fn find(&self, voter_id: Snowflake, target: VoteTarget) -> RepoResult<Option<VoteType>> {
        let ledger = Ledger::of(target.kind());
        let sql = format!(
            "SELECT {col} AS target_id, vote_type FROM {table} WHERE user_id = $1 AND {col} = $2",
            col = ledger.target_column,
            table = ledger.table,
        );
        let row = sqlx::query_as::<_, TargetVoteModel>(&sql)
            .bind(voter_id.into_inner())
            .bind(target.id().into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        row.map(|r| parse_vote_type(&r.vote_type)).transpose()
    }

    #[instrument(skip(self, target_ids), fields(count = target_ids.len()))]
    async fn find_for_targets(
        &self,
        voter_id: Snowflake,
        kind: VoteTargetKind,
        target_ids: &[Snowflake],
    ) -> RepoResult<HashMap<Snowflake, VoteType>> {
        if target_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ledger = Ledger::of(kind);
        let ids: Vec<i64> = target_ids.iter().map(|s| s.into_inner()).collect();
        let sql = format!(
            "SELECT {col} AS target_id, vote_type FROM {table} WHERE user_id = $1 AND {col} = ANY($2)",
            col = ledger.target_column,
            table = ledger.table,
        );
        let rows = sqlx::query_as::<_, TargetVoteModel>(&sql)
            .bind(voter_id.into_inner())
            .bind(&ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter()
            .map(|r| Ok((Snowflake::new(r.target_id), parse_vote_type(&r.vote_type)?)))
            .collect()
    }

    #[instrument(skip(self), fields(target = %target))]
    async fn apply(
        &self,
        voter_id: Snowflake,
        target: VoteTarget,
        desired: Option<VoteType>,
    ) -> RepoResult<VoteOutcome> {
        let ledger = Ledger::of(target.kind());
        let target_id = target.id();
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let exists: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)",
            ledger.counter_table
        ))
        .bind(target_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;
        if !exists {
            return Err(target.not_found());
        }

        let transition = Self::write_ledger(&mut tx, ledger, voter_id, target_id, desired).await?;

        let delta = transition.delta();
        let votes_count: i64 = if delta == 0 {
            sqlx::query_scalar(&format!(
                "SELECT votes_count FROM {} WHERE id = $1",
                ledger.counter_table
            ))
            .bind(target_id.into_inner())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?
        } else {
            sqlx::query_scalar(&format!(
                "UPDATE {} SET votes_count = votes_count + $2 WHERE id = $1 RETURNING votes_count",
                ledger.counter_table
            ))
            .bind(target_id.into_inner())
            .bind(delta)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?
        };

        tx.commit().await.map_err(map_db_error)?;

        Ok(VoteOutcome {
            target,
            previous: transition.existing,
            current: transition.desired,
            delta,
            votes_count,
        })
    }

    #[instrument(skip(self), fields(target = %target))]
    async fn ledger_total(&self, target: VoteTarget) -> RepoResult<i64> {
        let ledger = Ledger::of(target.kind());
        let sql = format!(
            "SELECT COALESCE(SUM(CASE vote_type WHEN 'UP' THEN 1 ELSE -1 END), 0)::BIGINT \
             FROM {table} WHERE {col} = $1",
            col = ledger.target_column,
            table = ledger.table,
        );
        let total: i64 = sqlx::query_scalar(&sql)
            .bind(target.id().into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(total)
    }
}
