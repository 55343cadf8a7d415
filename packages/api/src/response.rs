// ABOUTME: Shared API response envelope
// ABOUTME: Provides a consistent success/data/error shape across all endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::{Deserialize, Serialize};

use featureboard_storage::StorageError;

use crate::error::ApiError;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorDetail>,
}

/// Machine-readable error payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub request_id: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(detail: ErrorDetail) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(detail),
        }
    }
}

/// Wrap a storage result, answering `status` on success
pub fn respond<T: Serialize>(status: StatusCode, result: Result<T, StorageError>) -> Response {
    match result {
        Ok(data) => (status, ResponseJson(ApiResponse::success(data))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
