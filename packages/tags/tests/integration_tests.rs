// ABOUTME: Integration tests for tag storage operations
// ABOUTME: Tests lookup by id and name, pagination, and find-or-create semantics

use gazette_storage::{connect_in_memory, StorageError};
use gazette_tags::TagStorage;
use sqlx::SqlitePool;

async fn create_test_db() -> SqlitePool {
    connect_in_memory().await.unwrap()
}

async fn seed(pool: &SqlitePool, names: &[&str]) {
    let mut conn = pool.acquire().await.unwrap();
    for name in names {
        TagStorage::find_or_create(&mut conn, name).await.unwrap();
    }
}

async fn tag_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM tags")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_find_or_create_inserts_missing_tag() {
    let pool = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let tag = TagStorage::find_or_create(&mut conn, "rust").await.unwrap();
    drop(conn);

    assert_eq!(tag.name, "rust");
    assert!(tag.id > 0);
    assert_eq!(tag_count(&pool).await, 1);
}

#[tokio::test]
async fn test_find_or_create_reuses_existing_tag() {
    let pool = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let first = TagStorage::find_or_create(&mut conn, "go").await.unwrap();
    let second = TagStorage::find_or_create(&mut conn, "go").await.unwrap();
    drop(conn);

    assert_eq!(first.id, second.id);
    assert_eq!(first.created_at, second.created_at);
    assert_eq!(tag_count(&pool).await, 1);
}

#[tokio::test]
async fn test_find_or_create_is_case_sensitive() {
    let pool = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let lower = TagStorage::find_or_create(&mut conn, "rust").await.unwrap();
    let upper = TagStorage::find_or_create(&mut conn, "Rust").await.unwrap();
    drop(conn);

    assert_ne!(lower.id, upper.id);
    assert_eq!(tag_count(&pool).await, 2);
}

#[tokio::test]
async fn test_find_or_create_rolls_back_with_transaction() {
    let pool = create_test_db().await;

    let mut tx = pool.begin().await.unwrap();
    TagStorage::find_or_create(&mut tx, "ephemeral").await.unwrap();
    tx.rollback().await.unwrap();

    assert_eq!(tag_count(&pool).await, 0);
}

#[tokio::test]
async fn test_get_tag() {
    let pool = create_test_db().await;
    seed(&pool, &["Bug"]).await;
    let storage = TagStorage::new(pool);

    let created = storage.get_tag_by_name("Bug").await.unwrap().unwrap();
    let retrieved = storage.get_tag(created.id).await.unwrap();

    assert_eq!(retrieved, created);
}

#[tokio::test]
async fn test_get_missing_tag_is_not_found() {
    let storage = TagStorage::new(create_test_db().await);

    let result = storage.get_tag(42).await;
    assert!(matches!(result, Err(StorageError::NotFound)));
}

#[tokio::test]
async fn test_get_tag_by_name() {
    let pool = create_test_db().await;
    seed(&pool, &["Refactor"]).await;
    let storage = TagStorage::new(pool);

    let found = storage.get_tag_by_name("Refactor").await.unwrap();
    assert_eq!(found.unwrap().name, "Refactor");

    let not_found = storage.get_tag_by_name("refactor").await.unwrap();
    assert!(not_found.is_none());
}

#[tokio::test]
async fn test_list_tags_ordered_by_name() {
    let pool = create_test_db().await;
    seed(&pool, &["Feature", "Bug", "Docs"]).await;
    let storage = TagStorage::new(pool);

    let names: Vec<String> = storage
        .list_tags()
        .await
        .unwrap()
        .into_iter()
        .map(|tag| tag.name)
        .collect();

    assert_eq!(names, vec!["Bug", "Docs", "Feature"]);
}

#[tokio::test]
async fn test_list_tags_paginated() {
    let pool = create_test_db().await;
    seed(&pool, &["Tag0", "Tag1", "Tag2", "Tag3", "Tag4"]).await;
    let storage = TagStorage::new(pool);

    let (page1, total) = storage.list_tags_paginated(Some(2), Some(0)).await.unwrap();
    assert_eq!(page1.len(), 2);
    assert_eq!(total, 5);

    let (page3, _) = storage.list_tags_paginated(Some(2), Some(4)).await.unwrap();
    assert_eq!(page3.len(), 1);
    assert_eq!(page3[0].name, "Tag4");

    assert_ne!(page1[0].id, page3[0].id);
}
