//! Application state for quicknotes.
//!
//! Contains the shared state that is passed to all handlers.

use std::sync::Arc;

use crate::db::{self, DbPool, PoolConfig};
use crate::services::NoteService;
use crate::views::Views;
use crate::{config, Result};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DbPool,
    /// Note management service.
    pub notes: NoteService,
    /// Compiled page templates.
    pub views: Arc<Views>,
}

impl AppState {
    /// Create a new application state from the global configuration.
    pub async fn new() -> Result<Self> {
        let config = config::config();

        let pool_config =
            PoolConfig::for_path(&config.database.path, config.database.max_connections);
        let db = db::init_pool_with(&config.database.path, pool_config).await?;

        db::initialize_schema(&db).await?;
        db::health_check(&db).await?;

        Self::from_pool(db)
    }

    /// Wire the services around an already initialized pool.
    pub fn from_pool(db: DbPool) -> Result<Self> {
        let notes = NoteService::new(db.clone());
        let views = Arc::new(Views::build()?);

        Ok(Self { db, notes, views })
    }
}
