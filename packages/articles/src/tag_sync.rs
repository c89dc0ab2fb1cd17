// ABOUTME: Article-tag synchroniser
// ABOUTME: Resolves requested tag names with find-or-create and rebinds an article's tag set inside a transaction

use std::collections::HashSet;

use sqlx::SqliteConnection;
use tracing::debug;

use gazette_core::{validate_tag_name, ValidationErrors};
use gazette_storage::StorageError;
use gazette_tags::{Tag, TagStorage};

/// Check every requested name, keyed by its position in the request
pub fn validate_tag_names(names: &[String], errors: &mut ValidationErrors) {
    for (index, name) in names.iter().enumerate() {
        validate_tag_name(index, name, errors);
    }
}

/// Drop repeated names, keeping the first occurrence and the request order
pub fn dedupe_tag_names(names: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(String::as_str)
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Replace the article's tag set with exactly the requested names
///
/// Must run on the connection of the transaction that saves the article, so
/// new tags, relation rows and the article row commit or roll back together.
/// Returns the resolved tags in request order.
pub async fn sync_article_tags(
    conn: &mut SqliteConnection,
    article_id: i64,
    names: &[String],
) -> Result<Vec<Tag>, StorageError> {
    let unique = dedupe_tag_names(names);

    let mut tags = Vec::with_capacity(unique.len());
    for name in unique {
        tags.push(TagStorage::find_or_create(conn, name).await?);
    }

    let removed = sqlx::query("DELETE FROM article_tag_rel WHERE article_id = ?")
        .bind(article_id)
        .execute(&mut *conn)
        .await
        .map_err(StorageError::Sqlx)?
        .rows_affected();

    for tag in &tags {
        sqlx::query("INSERT INTO article_tag_rel (article_id, tag_id) VALUES (?, ?)")
            .bind(article_id)
            .bind(tag.id)
            .execute(&mut *conn)
            .await
            .map_err(StorageError::Sqlx)?;
    }

    debug!(
        "Rebound tags for article {} ({} relation rows removed, {} added)",
        article_id,
        removed,
        tags.len()
    );

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence_order() {
        let requested = names(&["rust", "go", "rust", "python", "go"]);
        assert_eq!(dedupe_tag_names(&requested), vec!["rust", "go", "python"]);
    }

    #[test]
    fn test_dedupe_is_case_sensitive() {
        let requested = names(&["Rust", "rust"]);
        assert_eq!(dedupe_tag_names(&requested), vec!["Rust", "rust"]);
    }

    #[test]
    fn test_dedupe_empty() {
        assert!(dedupe_tag_names(&[]).is_empty());
    }

    #[test]
    fn test_validate_reports_original_positions() {
        let mut errors = ValidationErrors::new();
        validate_tag_names(&names(&["rust", "rust", ""]), &mut errors);

        assert_eq!(errors.len(), 1);
        assert!(errors.contains("tags.2.name"));
    }
}
