// ABOUTME: HTTP handlers for the four board procedures
// ABOUTME: Each accepts a named-argument JSON payload and answers with the response envelope

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use featureboard_core::FeatureCreateInput;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::response::respond;
use crate::AppState;

/// Arguments for `list_features`
#[derive(Debug, Default, Deserialize)]
pub struct ListFeaturesArgs {
    #[serde(default)]
    pub filter_status: Option<String>,
}

/// List features with vote and comment aggregates; the body may be omitted
pub async fn list_features(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Bytes,
) -> Response {
    let args = if body.iter().all(u8::is_ascii_whitespace) {
        ListFeaturesArgs::default()
    } else {
        match serde_json::from_slice::<ListFeaturesArgs>(&body) {
            Ok(args) => args,
            Err(e) => return ApiError::InvalidRequest(e.to_string()).into_response(),
        }
    };

    info!(
        "Listing features for {} (filter_status: {:?})",
        user.id, args.filter_status
    );

    let result = state
        .board
        .list_features(&user.id, args.filter_status.as_deref())
        .await;
    respond(StatusCode::OK, result)
}

/// Arguments for `create_feature`
#[derive(Debug, Deserialize)]
pub struct CreateFeatureArgs {
    pub p_title: String,
    pub p_description: String,
    #[serde(default)]
    pub p_status: Option<String>,
}

/// Propose a new feature; answers with its id
pub async fn create_feature(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(args): Json<CreateFeatureArgs>,
) -> impl IntoResponse {
    info!("Creating feature '{}' for {}", args.p_title, user.id);

    let input = FeatureCreateInput {
        title: args.p_title,
        description: args.p_description,
        status: args.p_status,
    };

    let result = state.board.create_feature(&user.id, input).await;
    respond(StatusCode::CREATED, result)
}

/// Arguments for `toggle_vote`
#[derive(Debug, Deserialize)]
pub struct ToggleVoteArgs {
    pub p_feature_id: String,
    pub p_vote_type: String,
}

/// Add, remove or flip the caller's vote
pub async fn toggle_vote(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(args): Json<ToggleVoteArgs>,
) -> impl IntoResponse {
    info!(
        "Toggling {} on {} for {}",
        args.p_vote_type, args.p_feature_id, user.id
    );

    let result = state
        .board
        .toggle_vote(&user.id, &args.p_feature_id, &args.p_vote_type)
        .await;
    respond(StatusCode::OK, result)
}

/// Arguments for `add_comment`
#[derive(Debug, Deserialize)]
pub struct AddCommentArgs {
    pub p_feature_id: String,
    pub p_comment_text: String,
}

/// Append a comment; answers with its id
pub async fn add_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(args): Json<AddCommentArgs>,
) -> impl IntoResponse {
    info!("Adding comment to {} for {}", args.p_feature_id, user.id);

    let result = state
        .board
        .add_comment(&user.id, &args.p_feature_id, &args.p_comment_text)
        .await;
    respond(StatusCode::CREATED, result)
}
