// ABOUTME: Data layer and persistence for Gazette
// ABOUTME: SQLite pool setup, embedded migrations, pagination and the shared storage error type

use thiserror::Error;

pub mod db;
pub mod pagination;

pub use db::{connect, connect_in_memory, run_migrations, DatabaseConfig, MIGRATOR};
pub use pagination::{Page, PaginationMeta, PaginationParams};

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Record not found")]
    NotFound,
}

pub type StorageResult<T> = Result<T, StorageError>;
