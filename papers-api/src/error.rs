//! Error types for papers-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// `level` missing or not one of the five dimensions (400)
    #[error("Invalid or missing level parameter")]
    InvalidLevel,

    /// papers-common error (500)
    #[error(transparent)]
    Common(#[from] papers_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidLevel => (
                StatusCode::BAD_REQUEST,
                json!({ "error": ApiError::InvalidLevel.to_string() }),
            ),
            ApiError::Common(_) => {
                let details = self.to_string();
                error!("Request failed: {}", details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal Server Error",
                        "details": details,
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
