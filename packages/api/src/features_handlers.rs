// ABOUTME: HTTP handlers for direct feature and comment reads
// ABOUTME: Feature detail with aggregates and the newest-first comment log

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::auth::CurrentUser;
use crate::response::respond;
use crate::AppState;

/// Get a single feature with aggregates for the caller
pub async fn get_feature(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(feature_id): Path<String>,
) -> impl IntoResponse {
    info!("Getting feature {} for {}", feature_id, user.id);

    let result = state.board.get_feature(&user.id, &feature_id).await;
    respond(StatusCode::OK, result)
}

/// List a feature's comments, newest first
pub async fn list_comments(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(feature_id): Path<String>,
) -> impl IntoResponse {
    info!("Listing comments for feature {} for {}", feature_id, user.id);

    let result = state.board.list_comments(&feature_id).await;
    respond(StatusCode::OK, result)
}
