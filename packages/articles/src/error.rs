use gazette_core::ValidationErrors;
use gazette_storage::StorageError;
use thiserror::Error;

/// Errors surfaced by article operations
#[derive(Error, Debug)]
pub enum ArticleError {
    #[error("Article not found: {0}")]
    NotFound(i64),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<sqlx::Error> for ArticleError {
    fn from(err: sqlx::Error) -> Self {
        ArticleError::Storage(StorageError::Sqlx(err))
    }
}

impl From<ValidationErrors> for ArticleError {
    fn from(errors: ValidationErrors) -> Self {
        ArticleError::Validation(errors)
    }
}

pub type ArticleResult<T> = Result<T, ArticleError>;
