// ABOUTME: Caller identity for API requests
// ABOUTME: Reads the user id supplied by the fronting platform, with an optional default

use axum::{extract::FromRequestParts, http::request::Parts};

use featureboard_core::validate_user_id;

use crate::error::ApiError;
use crate::AppState;

/// Header carrying the caller's user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Current calling user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = match parts.headers.get(USER_ID_HEADER) {
            Some(value) => value
                .to_str()
                .map_err(|_| ApiError::Unauthorized("X-User-Id header is not valid text".into()))?
                .to_string(),
            None => state
                .default_user
                .clone()
                .ok_or_else(|| ApiError::Unauthorized("X-User-Id header is required".into()))?,
        };

        let id = validate_user_id(&raw).map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        Ok(Self { id })
    }
}
