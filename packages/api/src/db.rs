// ABOUTME: Shared database state for API handlers
// ABOUTME: Bundles the SQLite pool with the article and tag storages

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::info;

use gazette_articles::ArticleStorage;
use gazette_storage::{DatabaseConfig, StorageError};
use gazette_tags::TagStorage;

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub article_storage: Arc<ArticleStorage>,
    pub tag_storage: Arc<TagStorage>,
}

impl DbState {
    /// Create new database state from a SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            article_storage: Arc::new(ArticleStorage::new(pool.clone())),
            tag_storage: Arc::new(TagStorage::new(pool.clone())),
            pool,
        }
    }

    /// Connect to the configured database file and run migrations
    pub async fn init(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let pool = gazette_storage::connect(config).await?;
        info!("Database ready at {}", config.path.display());
        Ok(Self::new(pool))
    }

    /// Fresh in-memory database, used by tests and throwaway runs
    pub async fn in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(gazette_storage::connect_in_memory().await?))
    }
}
