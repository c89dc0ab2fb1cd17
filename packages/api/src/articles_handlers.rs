// ABOUTME: HTTP request handlers for article operations
// ABOUTME: Index, view, add, edit and delete, with tags resolved by name on add and edit

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use tracing::info;

use gazette_articles::{ArticleCreateInput, ArticleUpdateInput};
use gazette_storage::{Page, PaginationParams};

use crate::db::DbState;
use crate::extract::JsonBody;
use crate::response::{ApiResponse, ApiResult};

/// List articles with their tags and tag counts
pub async fn list_articles(
    State(db): State<DbState>,
    Query(pagination): Query<PaginationParams>,
) -> ApiResult<impl IntoResponse> {
    info!("Listing articles (page: {})", pagination.page());

    let (articles, total) = db
        .article_storage
        .list_articles_paginated(Some(pagination.limit()), Some(pagination.offset()))
        .await?;

    let page = Page::new(articles, &pagination, total);
    Ok(ResponseJson(ApiResponse::collection(page)))
}

/// Get a single article by ID
pub async fn get_article(
    State(db): State<DbState>,
    Path(article_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    info!("Getting article: {}", article_id);

    let article = db.article_storage.get_article(article_id).await?;
    Ok(ResponseJson(ApiResponse::model(article)))
}

/// Create a new article, creating any tags that do not exist yet
pub async fn create_article(
    State(db): State<DbState>,
    JsonBody(request): JsonBody<ArticleCreateInput>,
) -> ApiResult<impl IntoResponse> {
    info!(
        "Creating article: {:?} ({} tag(s) requested)",
        request.title,
        request.tags.len()
    );

    let article = db.article_storage.create_article(request).await?;
    Ok((StatusCode::CREATED, ResponseJson(ApiResponse::model(article))))
}

/// Update an article and replace its tags
pub async fn update_article(
    State(db): State<DbState>,
    Path(article_id): Path<i64>,
    JsonBody(request): JsonBody<ArticleUpdateInput>,
) -> ApiResult<impl IntoResponse> {
    info!(
        "Updating article: {} ({} tag(s) requested)",
        article_id,
        request.tags.len()
    );

    let article = db
        .article_storage
        .update_article(article_id, request)
        .await?;
    Ok(ResponseJson(ApiResponse::model(article)))
}

/// Delete an article; its tags are kept
pub async fn delete_article(
    State(db): State<DbState>,
    Path(article_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    info!("Deleting article: {}", article_id);

    db.article_storage.delete_article(article_id).await?;
    Ok(ResponseJson(ApiResponse::ok()))
}
