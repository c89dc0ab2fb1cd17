// ABOUTME: Tag storage layer using SQLite
// ABOUTME: Handles tag listing, lookup by id or name, and find-or-create inside a transaction

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use super::types::Tag;
use gazette_storage::StorageError;

pub struct TagStorage {
    pool: SqlitePool,
}

impl TagStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all tags ordered by name
    pub async fn list_tags(&self) -> Result<Vec<Tag>, StorageError> {
        let (tags, _) = self.list_tags_paginated(None, None).await?;
        Ok(tags)
    }

    /// List tags with optional pagination, returning the page and the total count
    pub async fn list_tags_paginated(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<(Vec<Tag>, i64), StorageError> {
        debug!("Fetching tags (limit: {:?}, offset: {:?})", limit, offset);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags")
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        // LIMIT -1 means "no limit" in SQLite
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT id, name, created_at FROM tags ORDER BY name LIMIT ? OFFSET ?",
        )
        .bind(limit.unwrap_or(-1))
        .bind(offset.unwrap_or(0))
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok((tags, count))
    }

    /// Get a single tag by ID
    pub async fn get_tag(&self, tag_id: i64) -> Result<Tag, StorageError> {
        debug!("Fetching tag: {}", tag_id);

        sqlx::query_as::<_, Tag>("SELECT id, name, created_at FROM tags WHERE id = ?")
            .bind(tag_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)
    }

    /// Get a tag by its exact (case-sensitive) name
    pub async fn get_tag_by_name(&self, name: &str) -> Result<Option<Tag>, StorageError> {
        debug!("Fetching tag by name: {}", name);

        let mut conn = self.pool.acquire().await.map_err(StorageError::Sqlx)?;
        Self::find_by_name(&mut conn, name).await
    }

    async fn find_by_name(
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<Option<Tag>, StorageError> {
        sqlx::query_as::<_, Tag>("SELECT id, name, created_at FROM tags WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await
            .map_err(StorageError::Sqlx)
    }

    /// Resolve a tag by exact name, inserting it when no such tag exists
    ///
    /// Runs on the caller's connection so it joins the caller's transaction.
    /// A concurrent insert of the same name is absorbed by the unique
    /// constraint and the existing row is returned.
    pub async fn find_or_create(
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<Tag, StorageError> {
        if let Some(tag) = Self::find_by_name(conn, name).await? {
            debug!("Reusing tag {} (name: {})", tag.id, tag.name);
            return Ok(tag);
        }

        debug!("Creating tag: {}", name);

        sqlx::query("INSERT INTO tags (name, created_at) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
            .bind(name)
            .bind(Utc::now())
            .execute(&mut *conn)
            .await
            .map_err(StorageError::Sqlx)?;

        Self::find_by_name(conn, name)
            .await?
            .ok_or_else(|| StorageError::Database(format!("Tag '{}' vanished after insert", name)))
    }
}
