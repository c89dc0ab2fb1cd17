// ABOUTME: Tag management for articles
// ABOUTME: Provides the tag type and its SQLite storage, including find-or-create by name

pub mod storage;
pub mod types;

// Re-export main types
pub use storage::TagStorage;
pub use types::Tag;
