use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::warn;

use bookrel_common::BookRelError;

/// HTTP rendering of [`BookRelError`].
pub struct ApiError(pub BookRelError);

impl From<BookRelError> for ApiError {
    fn from(e: BookRelError) -> Self {
        ApiError(e)
    }
}

// Malformed request parts render through the same error body as handler
// failures.
impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError(BookRelError::invalid(e.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError(BookRelError::invalid(e.body_text()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError(BookRelError::invalid(e.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BookRelError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            BookRelError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            BookRelError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            BookRelError::Config(_) | BookRelError::Anyhow(_) => {
                warn!(error = %self.0, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}
