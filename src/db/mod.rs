//! Database layer for quicknotes.
//!
//! Provides SQLite connection pooling, schema setup and the note
//! persistence gateway.

mod notes;
mod pool;

pub use notes::*;
pub use pool::{create_pool_with_config, health_check, PoolConfig};

use crate::Result;
use tracing::info;

/// Type alias for the SQLite connection pool.
pub type DbPool = sqlx::SqlitePool;

/// Initialize the database connection pool with the default profile.
///
/// `:memory:` databases get the single-connection profile so that every
/// query sees the same data.
pub async fn init_pool(path: &str) -> Result<DbPool> {
    let config = PoolConfig::for_path(path, PoolConfig::default().max_connections);
    init_pool_with(path, config).await
}

/// Initialize the database connection pool from an explicit profile.
pub async fn init_pool_with(path: &str, config: PoolConfig) -> Result<DbPool> {
    let pool = create_pool_with_config(path, config).await?;

    info!("Database pool initialized: {}", path);

    Ok(pool)
}

/// Initialize the database schema.
///
/// Applies the complete schema from schema.sql. Uses IF NOT EXISTS
/// clauses so it's safe to run multiple times.
pub async fn initialize_schema(pool: &DbPool) -> Result<()> {
    let schema = include_str!("../../schema.sql");

    info!("Initializing database schema");

    for statement in schema_statements(schema) {
        sqlx::query(&statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully");

    Ok(())
}

/// Split a SQL script into statements.
///
/// Comment lines are dropped before splitting, so a `;` inside a comment
/// never ends a statement.
fn schema_statements(schema: &str) -> Vec<String> {
    let sql = schema
        .lines()
        .filter(|line| !line.trim().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(str::to_string)
        .collect()
}
