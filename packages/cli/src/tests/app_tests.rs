use crate::config::{Config, ConfigError};
use crate::build_app;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use featureboard_storage::FeatureBoard;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

async fn test_setup(cors_origin: &str) -> (Config, Arc<FeatureBoard>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("board.db").to_string_lossy().to_string();
    let config = Config::from_lookup(|key| match key {
        "DATABASE_PATH" => Some(db_path.clone()),
        "CORS_ORIGIN" => Some(cors_origin.to_string()),
        _ => None,
    })
    .unwrap();
    let board = FeatureBoard::open(&config.database_config()).await.unwrap();
    (config, Arc::new(board), dir)
}

#[tokio::test]
async fn test_app_serves_health_with_cors() {
    let (config, board, _dir) = test_setup("http://localhost:3000").await;
    let app = build_app(board, &config).unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
}

#[tokio::test]
async fn test_app_rejects_invalid_cors_origin() {
    let (config, board, _dir) = test_setup("bad\norigin").await;

    let result = build_app(board, &config);

    assert!(matches!(result, Err(ConfigError::InvalidCorsOrigin(_))));
}
