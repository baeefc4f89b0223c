use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::pipeline::GenerationError;
use crate::store::StoreError;

/// Handler-level failure. Every variant renders as
/// `{"success": false, "error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request fields; the message goes to the client verbatim.
    #[error("{0}")]
    Validation(String),

    #[error("Failed to {action}: {source}")]
    Generation {
        action: &'static str,
        #[source]
        source: GenerationError,
    },

    #[error("Failed to store generated content: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to fetch content: {0}")]
    Fetch(#[source] StoreError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Store(_) | ApiError::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(%status, error = %message, "❌ Request failed");
        } else {
            tracing::warn!(%status, error = %message, "Request rejected");
        }
        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}
