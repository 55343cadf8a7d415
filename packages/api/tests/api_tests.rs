// ABOUTME: HTTP tests for the RPC and read endpoints
// ABOUTME: Drives the router with oneshot requests against a temporary database

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use featureboard_api::{create_router, AppState};
use featureboard_storage::{DatabaseConfig, FeatureBoard};

async fn create_test_app(default_user: Option<&str>) -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig::new(dir.path().join("board.db"));
    let board = FeatureBoard::open(&config).await.unwrap();
    let state = AppState::new(Arc::new(board), default_user.map(str::to_string));
    (create_router(state), dir)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

async fn rpc(app: &Router, name: &str, user: &str, args: Value) -> (StatusCode, Value) {
    send(app, Method::POST, &format!("/rpc/{}", name), Some(user), Some(args)).await
}

async fn create_feature(app: &Router, title: &str) -> String {
    let (status, body) = rpc(
        app,
        "create_feature",
        "alice",
        json!({
            "p_title": title,
            "p_description": "Add dark mode theme to the application",
            "p_status": "proposed"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _dir) = create_test_app(None).await;

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_and_list_features() {
    let (app, _dir) = create_test_app(None).await;
    let id = create_feature(&app, "Dark Mode Support").await;

    let (status, body) = rpc(&app, "list_features", "bob", json!({ "filter_status": null })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let features = body["data"].as_array().unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["id"], id);
    assert_eq!(features[0]["title"], "Dark Mode Support");
    assert_eq!(features[0]["status"], "proposed");
    assert_eq!(features[0]["created_by"], "alice");
    assert_eq!(features[0]["upvote_count"], 0);
    assert_eq!(features[0]["net_votes"], 0);
    assert!(features[0]["user_vote"].is_null());
}

#[tokio::test]
async fn test_create_feature_validation_error() {
    let (app, _dir) = create_test_app(None).await;

    let (status, body) = rpc(
        &app,
        "create_feature",
        "alice",
        json!({ "p_title": "Hi", "p_description": "Long enough description" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("at least 3"));
    assert!(body["error"]["request_id"].is_string());
}

#[tokio::test]
async fn test_create_feature_invalid_status() {
    let (app, _dir) = create_test_app(None).await;

    let (status, body) = rpc(
        &app,
        "create_feature",
        "alice",
        json!({
            "p_title": "Test Feature",
            "p_description": "This should fail on status",
            "p_status": "invalid_status"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("invalid_status"));
}

#[tokio::test]
async fn test_toggle_vote_sequence() {
    let (app, _dir) = create_test_app(None).await;
    let id = create_feature(&app, "Dark Mode Support").await;
    let args = |vote: &str| json!({ "p_feature_id": id, "p_vote_type": vote });

    let (status, added) = rpc(&app, "toggle_vote", "bob", args("upvote")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(added["data"]["action"], "added");
    assert_eq!(added["data"]["current_vote"], "upvote");

    let (_, removed) = rpc(&app, "toggle_vote", "bob", args("upvote")).await;
    assert_eq!(removed["data"]["action"], "removed");
    assert!(removed["data"]["current_vote"].is_null());

    rpc(&app, "toggle_vote", "bob", args("upvote")).await;
    let (_, changed) = rpc(&app, "toggle_vote", "bob", args("downvote")).await;
    assert_eq!(changed["data"]["action"], "changed");
    assert_eq!(changed["data"]["current_vote"], "downvote");

    let (_, listed) = rpc(&app, "list_features", "bob", json!({})).await;
    let feature = &listed["data"][0];
    assert_eq!(feature["upvote_count"], 0);
    assert_eq!(feature["downvote_count"], 1);
    assert_eq!(feature["net_votes"], -1);
    assert_eq!(feature["user_vote"], "downvote");
}

#[tokio::test]
async fn test_toggle_vote_errors() {
    let (app, _dir) = create_test_app(None).await;
    let id = create_feature(&app, "Dark Mode Support").await;

    let (status, body) = rpc(
        &app,
        "toggle_vote",
        "bob",
        json!({ "p_feature_id": id, "p_vote_type": "invalid_vote" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = rpc(
        &app,
        "toggle_vote",
        "bob",
        json!({ "p_feature_id": "feat-missing", "p_vote_type": "upvote" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "FEATURE_NOT_FOUND");
}

#[tokio::test]
async fn test_add_and_list_comments() {
    let (app, _dir) = create_test_app(None).await;
    let id = create_feature(&app, "Dark Mode Support").await;

    let (status, first) = rpc(
        &app,
        "add_comment",
        "bob",
        json!({ "p_feature_id": id, "p_comment_text": "Great idea!" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(first["data"].as_str().unwrap().starts_with("cmt-"));

    rpc(
        &app,
        "add_comment",
        "carol",
        json!({ "p_feature_id": id, "p_comment_text": "Prioritize for next sprint" }),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/features/{}/comments", id),
        Some("bob"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let comments = body["data"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["comment_text"], "Prioritize for next sprint");
    assert_eq!(comments[1]["id"], first["data"]);

    let (_, detail) = send(&app, Method::GET, &format!("/features/{}", id), Some("bob"), None).await;
    assert_eq!(detail["data"]["comment_count"], 2);
}

#[tokio::test]
async fn test_add_comment_errors() {
    let (app, _dir) = create_test_app(None).await;
    let id = create_feature(&app, "Dark Mode Support").await;

    let (status, _) = rpc(
        &app,
        "add_comment",
        "bob",
        json!({ "p_feature_id": id, "p_comment_text": "   " }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = rpc(
        &app,
        "add_comment",
        "bob",
        json!({
            "p_feature_id": "00000000-0000-0000-0000-000000000000",
            "p_comment_text": "This should fail"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_unknown_feature() {
    let (app, _dir) = create_test_app(None).await;

    let (status, body) = send(&app, Method::GET, "/features/feat-missing", Some("bob"), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "FEATURE_NOT_FOUND");
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let (app, _dir) = create_test_app(None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/rpc/list_features",
        None,
        Some(json!({ "filter_status": null })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_default_user_is_used_without_header() {
    let (app, _dir) = create_test_app(Some("kiosk")).await;
    let id = create_feature(&app, "Dark Mode Support").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/rpc/toggle_vote",
        None,
        Some(json!({ "p_feature_id": id, "p_vote_type": "upvote" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, as_kiosk) = rpc(&app, "list_features", "kiosk", json!({})).await;
    assert_eq!(as_kiosk["data"][0]["user_vote"], "upvote");

    let (_, as_bob) = rpc(&app, "list_features", "bob", json!({})).await;
    assert!(as_bob["data"][0]["user_vote"].is_null());
    assert_eq!(as_bob["data"][0]["upvote_count"], 1);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let (app, _dir) = create_test_app(None).await;

    let (status, _) = rpc(
        &app,
        "toggle_vote",
        "bob",
        json!({ "p_feature_id": "feat-x" }),
    )
    .await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_list_features_without_body() {
    let (app, _dir) = create_test_app(None).await;
    create_feature(&app, "Dark Mode Support").await;

    let (status, body) = send(&app, Method::POST, "/rpc/list_features", Some("bob"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_features_filter() {
    let (app, _dir) = create_test_app(None).await;
    create_feature(&app, "Dark Mode Support").await;

    let (status, body) = rpc(
        &app,
        "list_features",
        "bob",
        json!({ "filter_status": "completed" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, body) = rpc(
        &app,
        "list_features",
        "bob",
        json!({ "filter_status": "shipped" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_features_invalid_body() {
    let (app, _dir) = create_test_app(None).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/rpc/list_features")
        .header("x-user-id", "bob")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comments_require_identity() {
    let (app, _dir) = create_test_app(None).await;
    let id = create_feature(&app, "Dark Mode Support").await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/features/{}/comments", id),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_control_characters_are_validation_errors() {
    let (app, _dir) = create_test_app(None).await;
    let id = create_feature(&app, "Dark Mode Support").await;

    let (status, body) = rpc(
        &app,
        "create_feature",
        "alice",
        json!({ "p_title": "Hi\u{0}there", "p_description": "0123456789 long" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = rpc(
        &app,
        "add_comment",
        "bob",
        json!({ "p_feature_id": id, "p_comment_text": "\u{0}abc" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}
