// ABOUTME: Concurrent writer tests against a file-backed database
// ABOUTME: Parallel creates and edits must all commit and share one row per tag name

use std::sync::Arc;

use gazette_articles::{ArticleCreateInput, ArticleStorage, ArticleUpdateInput};
use gazette_storage::{connect, DatabaseConfig};
use pretty_assertions::assert_eq;
use sqlx::SqlitePool;
use tempfile::TempDir;

const WRITERS: usize = 40;

async fn create_file_db() -> (TempDir, SqlitePool) {
    let temp_dir = TempDir::new().unwrap();
    let config = DatabaseConfig::with_path(temp_dir.path().join("gazette.db"));
    let pool = connect(&config).await.unwrap();
    (temp_dir, pool)
}

fn create_input(title: String, tags: Vec<String>) -> ArticleCreateInput {
    ArticleCreateInput {
        title: Some(title),
        tags,
        ..Default::default()
    }
}

async fn tag_rows(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM tags WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_share_tags() {
    let (_temp_dir, pool) = create_file_db().await;
    let storage = Arc::new(ArticleStorage::new(pool.clone()));

    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let storage = Arc::clone(&storage);
            tokio::spawn(async move {
                storage
                    .create_article(create_input(
                        format!("Article {}", i),
                        vec!["shared".to_string(), format!("t{}", i)],
                    ))
                    .await
            })
        })
        .collect();

    for handle in handles {
        let article = handle.await.unwrap().unwrap();
        assert_eq!(article.tags.len(), 2);
    }

    let (articles, total) = storage.list_articles_paginated(None, None).await.unwrap();
    assert_eq!(total, WRITERS as i64);
    assert!(articles.iter().all(|item| item.count_tags == 2));
    assert_eq!(tag_rows(&pool, "shared").await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_edits_of_one_article() {
    let (_temp_dir, pool) = create_file_db().await;
    let storage = Arc::new(ArticleStorage::new(pool.clone()));

    let article = storage
        .create_article(create_input("Contended".to_string(), vec![]))
        .await
        .unwrap();
    let article_id = article.id;

    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let storage = Arc::clone(&storage);
            tokio::spawn(async move {
                storage
                    .update_article(
                        article_id,
                        ArticleUpdateInput {
                            tags: vec![format!("t{}", i), "shared".to_string()],
                            ..Default::default()
                        },
                    )
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Last writer wins: exactly one full tag set remains bound
    let article = storage.get_article(article_id).await.unwrap();
    assert_eq!(article.tags.len(), 2);
    assert_eq!(article.tags[1].name, "shared");
    assert_eq!(article.title, "Contended");
    assert_eq!(tag_rows(&pool, "shared").await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_edits_of_different_articles() {
    let (_temp_dir, pool) = create_file_db().await;
    let storage = Arc::new(ArticleStorage::new(pool.clone()));

    let mut ids = Vec::with_capacity(WRITERS);
    for i in 0..WRITERS {
        let article = storage
            .create_article(create_input(format!("Article {}", i), vec![]))
            .await
            .unwrap();
        ids.push(article.id);
    }

    let handles: Vec<_> = ids
        .iter()
        .map(|&id| {
            let storage = Arc::clone(&storage);
            tokio::spawn(async move {
                storage
                    .update_article(
                        id,
                        ArticleUpdateInput {
                            title: Some(format!("Edited {}", id)),
                            tags: vec!["shared".to_string(), format!("own-{}", id)],
                            ..Default::default()
                        },
                    )
                    .await
            })
        })
        .collect();

    for handle in handles {
        let article = handle.await.unwrap().unwrap();
        assert_eq!(article.title, format!("Edited {}", article.id));
        let own = format!("own-{}", article.id);
        assert_eq!(article.tag_names(), vec!["shared", own.as_str()]);
    }

    assert_eq!(tag_rows(&pool, "shared").await, 1);
    let relations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM article_tag_rel")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(relations, 2 * WRITERS as i64);
}
