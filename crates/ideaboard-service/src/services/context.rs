//! Service context - dependency container for services
//!
//! Holds the repositories, token verifier and ID generator needed by services.

use std::sync::Arc;

use ideaboard_common::auth::JwtService;
use ideaboard_core::traits::{CommentRepository, IdeaRepository, VoteRepository};
use ideaboard_core::{Snowflake, SnowflakeGenerator};
use ideaboard_db::{MemoryStore, PgCommentRepository, PgIdeaRepository, PgPool, PgVoteRepository};
use tracing::warn;

/// Service context containing all dependencies
///
/// The pool is absent when running against the in-memory store; readiness
/// then reports the store as always reachable.
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: Option<PgPool>,

    // Repositories
    idea_repo: Arc<dyn IdeaRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    vote_repo: Arc<dyn VoteRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Wire the PostgreSQL repositories over one pool
    pub fn postgres(
        pool: PgPool,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            idea_repo: Arc::new(PgIdeaRepository::new(pool.clone())),
            comment_repo: Arc::new(PgCommentRepository::new(pool.clone())),
            vote_repo: Arc::new(PgVoteRepository::new(pool.clone())),
            pool: Some(pool),
            jwt_service,
            snowflake_generator,
        }
    }

    /// Wire every repository to one shared in-memory store
    pub fn in_memory(
        store: MemoryStore,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        let store = Arc::new(store);
        Self {
            pool: None,
            idea_repo: store.clone(),
            comment_repo: store.clone(),
            vote_repo: store,
            jwt_service,
            snowflake_generator,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if one backs this context
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Round-trip to the database. Always healthy without a pool.
    pub async fn check_database(&self) -> bool {
        let Some(pool) = &self.pool else {
            return true;
        };
        match sqlx::query("SELECT 1").execute(pool).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Database readiness check failed");
                false
            }
        }
    }

    // === Repositories ===

    /// Get the idea repository
    pub fn idea_repo(&self) -> &dyn IdeaRepository {
        self.idea_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the vote repository
    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish()
    }
}
