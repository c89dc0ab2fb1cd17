use crate::build_app;
use crate::config::Config;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use gazette_api::DbState;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use tower::ServiceExt;

fn test_config(cors_origin: &str) -> Config {
    Config {
        port: 4001,
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        cors_origin: cors_origin.to_string(),
        database_path: PathBuf::from("unused.db"),
        db_max_connections: 1,
    }
}

#[tokio::test]
async fn test_app_serves_health() {
    let db = DbState::in_memory().await.unwrap();
    let app = build_app(db, &test_config("http://localhost:5173")).unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let db = DbState::in_memory().await.unwrap();
    let app = build_app(db, &test_config("http://localhost:5173")).unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/articles")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("http://localhost:5173")
    );
}

#[tokio::test]
async fn test_invalid_cors_origin_is_rejected() {
    let db = DbState::in_memory().await.unwrap();
    let result = build_app(db, &test_config("bad\norigin"));
    assert!(result.is_err());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let db = DbState::in_memory().await.unwrap();
    let app = build_app(db, &test_config("http://localhost:5173")).unwrap();

    let request = Request::builder()
        .uri("/api/nonexistent")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
