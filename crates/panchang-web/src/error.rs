use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use panchang_core::{CoreError, ValidationError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{field} value {value} is out of range")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("malformed request: {0}")]
    Malformed(String),

    #[error(transparent)]
    Internal(#[from] CoreError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::OutOfRange { .. } | Self::Malformed(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message; internal details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => String::from("Failed to compute panchang"),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Self::Internal(cause) = &self {
            error!(error = %cause, "panchang request failed");
        }

        (
            status,
            Json(json!({
                "success": false,
                "error": self.public_message(),
            })),
        )
            .into_response()
    }
}
