// ABOUTME: Article management with many-to-many tags
// ABOUTME: Provides article types, validation, the tag synchroniser and SQLite storage

pub mod error;
pub mod storage;
pub mod tag_sync;
pub mod types;

pub use error::{ArticleError, ArticleResult};
pub use storage::ArticleStorage;
pub use tag_sync::{dedupe_tag_names, sync_article_tags, validate_tag_names};
pub use types::{Article, ArticleCreateInput, ArticleListItem, ArticleUpdateInput};
