// ABOUTME: HTTP API layer for Gazette providing REST endpoints and routing
// ABOUTME: Integration layer that wires the article and tag storages into axum

use axum::{
    routing::{get, post},
    Router,
};

pub mod articles_handlers;
pub mod db;
pub mod extract;
pub mod health;
pub mod response;
pub mod tags_handlers;

pub use db::DbState;
pub use extract::JsonBody;
pub use response::{ApiError, ApiResponse, ApiResult};

/// Creates the articles API router (nested under /api/articles)
pub fn create_articles_router() -> Router<DbState> {
    Router::new()
        .route(
            "/",
            get(articles_handlers::list_articles).post(articles_handlers::create_article),
        )
        .route(
            "/{id}",
            get(articles_handlers::get_article)
                .put(articles_handlers::update_article)
                .patch(articles_handlers::update_article)
                .post(articles_handlers::update_article)
                .delete(articles_handlers::delete_article),
        )
        .route("/{id}/delete", post(articles_handlers::delete_article))
}

/// Creates the tags API router (nested under /api/tags)
pub fn create_tags_router() -> Router<DbState> {
    Router::new().route("/", get(tags_handlers::list_tags))
}

/// Creates the full application router with state applied
pub fn create_router(db: DbState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .nest("/api/articles", create_articles_router())
        .nest("/api/tags", create_tags_router())
        .with_state(db)
}
