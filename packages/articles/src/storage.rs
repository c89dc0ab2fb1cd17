// ABOUTME: Article storage layer using SQLite
// ABOUTME: Paginated listing with tag counts, and transactional create/update that rebinds tags

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use gazette_tags::Tag;

use crate::error::{ArticleError, ArticleResult};
use crate::tag_sync::sync_article_tags;
use crate::types::{Article, ArticleCreateInput, ArticleListItem, ArticleUpdateInput};

#[derive(FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    description: Option<String>,
    author_name: Option<String>,
    publish_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ArticleRow {
    fn into_article(self, tags: Vec<Tag>) -> Article {
        Article {
            id: self.id,
            title: self.title,
            description: self.description,
            author_name: self.author_name,
            publish_date: self.publish_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
            tags,
        }
    }
}

#[derive(FromRow)]
struct CountedArticleRow {
    #[sqlx(flatten)]
    article: ArticleRow,
    count_tags: i64,
}

#[derive(FromRow)]
struct TagLink {
    article_id: i64,
    #[sqlx(flatten)]
    tag: Tag,
}

pub struct ArticleStorage {
    pool: SqlitePool,
}

impl ArticleStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all articles with their tags and tag counts
    pub async fn list_articles(&self) -> ArticleResult<Vec<ArticleListItem>> {
        let (articles, _) = self.list_articles_paginated(None, None).await?;
        Ok(articles)
    }

    /// List articles ordered by id, returning the page and the total count
    ///
    /// Articles without tags are kept by the outer join and report a count of zero.
    pub async fn list_articles_paginated(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> ArticleResult<(Vec<ArticleListItem>, i64)> {
        debug!("Fetching articles (limit: {:?}, offset: {:?})", limit, offset);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, CountedArticleRow>(
            r#"
            SELECT a.id, a.title, a.description, a.author_name, a.publish_date,
                   a.created_at, a.updated_at,
                   COUNT(r.article_id) AS count_tags
            FROM articles a
            LEFT JOIN article_tag_rel r ON r.article_id = a.id
            GROUP BY a.id
            ORDER BY a.id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit.unwrap_or(-1))
        .bind(offset.unwrap_or(0))
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i64> = rows.iter().map(|row| row.article.id).collect();
        let mut tags_by_article = self.load_tags(&ids).await?;

        let articles = rows
            .into_iter()
            .map(|row| {
                let tags = tags_by_article.remove(&row.article.id).unwrap_or_default();
                ArticleListItem {
                    article: row.article.into_article(tags),
                    count_tags: row.count_tags,
                }
            })
            .collect();

        Ok((articles, total))
    }

    /// Get a single article with its tags
    pub async fn get_article(&self, article_id: i64) -> ArticleResult<Article> {
        debug!("Fetching article: {}", article_id);

        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT id, title, description, author_name, publish_date, created_at, updated_at
            FROM articles
            WHERE id = ?
            "#,
        )
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ArticleError::NotFound(article_id))?;

        let tags = self
            .load_tags(&[article_id])
            .await?
            .remove(&article_id)
            .unwrap_or_default();

        Ok(row.into_article(tags))
    }

    /// Create an article and bind its tags in one transaction
    pub async fn create_article(&self, input: ArticleCreateInput) -> ArticleResult<Article> {
        let article = input.validate()?;
        let now = Utc::now();

        debug!("Creating article: {}", article.title);

        let mut tx = self.pool.begin().await?;

        let article_id = sqlx::query(
            r#"
            INSERT INTO articles (title, description, author_name, publish_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&article.title)
        .bind(&article.description)
        .bind(&article.author_name)
        .bind(article.publish_date)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        sync_article_tags(&mut tx, article_id, &input.tags).await?;

        tx.commit().await?;

        info!("Created article {} with {} tag(s)", article_id, input.tags.len());

        self.get_article(article_id).await
    }

    /// Patch an article and replace its tag set in one transaction
    pub async fn update_article(
        &self,
        article_id: i64,
        input: ArticleUpdateInput,
    ) -> ArticleResult<Article> {
        let changes = input.validate()?;

        debug!("Updating article: {}", article_id);

        // The first statement must write: a deferred transaction that reads
        // first cannot wait for the write lock and fails with SQLITE_BUSY.
        let mut tx = self.pool.begin().await?;

        let mut query_builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("UPDATE articles SET updated_at = ");
        query_builder.push_bind(Utc::now());

        if let Some(title) = changes.title {
            query_builder.push(", title = ");
            query_builder.push_bind(title);
        }
        if let Some(description) = changes.description {
            query_builder.push(", description = ");
            query_builder.push_bind(description);
        }
        if let Some(author_name) = changes.author_name {
            query_builder.push(", author_name = ");
            query_builder.push_bind(author_name);
        }
        if let Some(publish_date) = changes.publish_date {
            query_builder.push(", publish_date = ");
            query_builder.push_bind(publish_date);
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(article_id);

        let updated = query_builder
            .build()
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if updated == 0 {
            return Err(ArticleError::NotFound(article_id));
        }

        sync_article_tags(&mut tx, article_id, &input.tags).await?;

        tx.commit().await?;

        info!("Updated article {}", article_id);

        self.get_article(article_id).await
    }

    /// Hard-delete an article; its relation rows cascade, its tags stay
    pub async fn delete_article(&self, article_id: i64) -> ArticleResult<()> {
        debug!("Deleting article: {}", article_id);

        let deleted = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(article_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(ArticleError::NotFound(article_id));
        }

        info!("Deleted article {}", article_id);

        Ok(())
    }

    /// Tags for each of the given articles, in the order they were bound
    async fn load_tags(&self, article_ids: &[i64]) -> ArticleResult<HashMap<i64, Vec<Tag>>> {
        let mut tags_by_article: HashMap<i64, Vec<Tag>> = HashMap::new();
        if article_ids.is_empty() {
            return Ok(tags_by_article);
        }

        let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            SELECT r.article_id, t.id, t.name, t.created_at
            FROM article_tag_rel r
            JOIN tags t ON t.id = r.tag_id
            WHERE r.article_id IN ("#,
        );
        let mut separated = query_builder.separated(", ");
        for id in article_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY r.article_id, r.id");

        let links = query_builder
            .build_query_as::<TagLink>()
            .fetch_all(&self.pool)
            .await?;

        for link in links {
            tags_by_article
                .entry(link.article_id)
                .or_default()
                .push(link.tag);
        }

        Ok(tags_by_article)
    }
}
