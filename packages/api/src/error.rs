use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use featureboard_storage::StorageError;

use crate::response::{ApiResponse, ErrorDetail};

/// Error type returned by every handler
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// HTTP status code and machine-readable error code
    fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ApiError::Storage(storage_error) => match storage_error {
                StorageError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                StorageError::FeatureNotFound(_) => (StatusCode::NOT_FOUND, "FEATURE_NOT_FOUND"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            },
        }
    }

    /// Message safe to show to callers; datastore details stay in the logs
    fn to_user_message(&self) -> String {
        match self {
            ApiError::Unauthorized(msg) => msg.clone(),
            ApiError::InvalidRequest(_) => self.to_string(),
            ApiError::Storage(storage_error) if storage_error.is_client_error() => {
                storage_error.to_string()
            }
            ApiError::Storage(_) => "A datastore error occurred".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();

        if status_code.is_server_error() {
            error!(
                request_id = %request_id,
                error = %self,
                "Storage system error"
            );
        } else {
            info!(
                request_id = %request_id,
                error_code = %error_code,
                error = %self,
                "API error response"
            );
        }

        let detail = ErrorDetail {
            code: error_code.to_string(),
            message: self.to_user_message(),
            request_id,
        };

        (status_code, Json(ApiResponse::<()>::error(detail))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use featureboard_core::ValidationError;

    #[test]
    fn test_validation_error_status() {
        let error = ApiError::from(StorageError::Validation(ValidationError::InvalidVoteType(
            "sideways".to_string(),
        )));
        let (status, code) = error.to_status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
        assert!(error.to_user_message().contains("sideways"));
    }

    #[test]
    fn test_not_found_error() {
        let error = ApiError::from(StorageError::FeatureNotFound("feat-x".to_string()));
        let (status, code) = error.to_status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "FEATURE_NOT_FOUND");
    }

    #[test]
    fn test_unauthorized_error() {
        let error = ApiError::Unauthorized("X-User-Id header is required".to_string());
        let (status, code) = error.to_status_and_code();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(code, "UNAUTHORIZED");
    }

    #[test]
    fn test_user_message_sanitization() {
        let error = ApiError::from(StorageError::Database(
            "disk I/O error at /var/secret/path".to_string(),
        ));
        let message = error.to_user_message();
        assert_eq!(message, "A datastore error occurred");
        assert!(!message.contains("secret"));
        assert_eq!(error.to_status_and_code().0, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
