// ABOUTME: HTTP API layer for the feature board
// ABOUTME: Named-argument RPC endpoints plus feature and comment reads

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use featureboard_storage::FeatureBoard;

pub mod auth;
pub mod error;
pub mod features_handlers;
pub mod health;
pub mod response;
pub mod rpc_handlers;

pub use auth::{CurrentUser, USER_ID_HEADER};
pub use error::ApiError;
pub use response::{ApiResponse, ErrorDetail};

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<FeatureBoard>,
    /// Caller used when a request carries no identity header
    pub default_user: Option<String>,
}

impl AppState {
    pub fn new(board: Arc<FeatureBoard>, default_user: Option<String>) -> Self {
        Self {
            board,
            default_user,
        }
    }
}

/// Creates the full API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/rpc", create_rpc_router())
        .nest("/features", create_features_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Creates the RPC router (one POST endpoint per procedure)
pub fn create_rpc_router() -> Router<AppState> {
    Router::new()
        .route("/list_features", post(rpc_handlers::list_features))
        .route("/create_feature", post(rpc_handlers::create_feature))
        .route("/toggle_vote", post(rpc_handlers::toggle_vote))
        .route("/add_comment", post(rpc_handlers::add_comment))
}

/// Creates the read-only features router
pub fn create_features_router() -> Router<AppState> {
    Router::new()
        .route("/{feature_id}", get(features_handlers::get_feature))
        .route(
            "/{feature_id}/comments",
            get(features_handlers::list_comments),
        )
}
