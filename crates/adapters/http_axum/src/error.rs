//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use sprout_domain::error::SproutError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`SproutError`] to an HTTP response with appropriate status code.
pub struct ApiError(SproutError);

impl From<SproutError> for ApiError {
    fn from(err: SproutError) -> Self {
        Self(err)
    }
}

impl From<sprout_domain::error::ValidationError> for ApiError {
    fn from(err: sprout_domain::error::ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            SproutError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            SproutError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            SproutError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            SproutError::Inference(err) => {
                tracing::error!(error = %err, "inference error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
