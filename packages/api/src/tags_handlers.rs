// ABOUTME: HTTP request handlers for tag operations
// ABOUTME: Read-only listing; tags are created through article add and edit

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json as ResponseJson},
};
use tracing::info;

use gazette_storage::{Page, PaginationParams};

use crate::db::DbState;
use crate::response::{ApiResponse, ApiResult};

/// List tags ordered by name
pub async fn list_tags(
    State(db): State<DbState>,
    Query(pagination): Query<PaginationParams>,
) -> ApiResult<impl IntoResponse> {
    info!("Listing tags (page: {})", pagination.page());

    let (tags, total) = db
        .tag_storage
        .list_tags_paginated(Some(pagination.limit()), Some(pagination.offset()))
        .await?;

    Ok(ResponseJson(ApiResponse::collection(Page::new(
        tags,
        &pagination,
        total,
    ))))
}
