//! Schema setup
//!
//! The schema script is idempotent (`IF NOT EXISTS` throughout) and is applied
//! as one multi-statement batch on startup.

use sqlx::PgPool;
use tracing::info;

const SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

/// Apply the schema to the database behind `pool`
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("Database schema is up to date");
    Ok(())
}
