// ABOUTME: Server bootstrap for the Gazette binary
// ABOUTME: Tracing setup, HTTP layers (CORS, request tracing) and the serve loop

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gazette_api::DbState;

pub mod config;

#[cfg(test)]
mod tests;

use config::Config;

/// Install the global tracing subscriber (RUST_LOG, defaulting to info)
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();
}

/// Wrap the API router with CORS and request tracing
pub fn build_app(db: DbState, config: &Config) -> anyhow::Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);

    Ok(gazette_api::create_router(db)
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

/// Open the database, apply migrations and serve until Ctrl-C
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let db = DbState::init(&config.database_config())
        .await
        .context("Failed to open database")?;

    let app = build_app(db, &config)?;
    let addr = config.socket_addr();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
