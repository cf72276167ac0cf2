//! HTTP error mapping
//!
//! Translates the domain error taxonomy into response statuses: missing
//! sessions become 401, store-reported and validation failures 400, OAuth
//! and provider failures 502 (the caller must restart the authorization
//! flow), everything unexpected 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tasklane_domain::TasklaneError;
use tracing::error;

/// API error wrapper around the domain error.
#[derive(Debug)]
pub struct ApiError(pub TasklaneError);

impl From<TasklaneError> for ApiError {
    fn from(value: TasklaneError) -> Self {
        Self(value)
    }
}

/// Error response body; the message is passed through from the source.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TasklaneError::AuthRequired(_) => StatusCode::UNAUTHORIZED,
            TasklaneError::Store(_) | TasklaneError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TasklaneError::NotFound(_) => StatusCode::NOT_FOUND,
            // Token lifecycle errors are surfaced so the user can restart the
            // authorization flow instead of being silently stranded.
            TasklaneError::NoToken(_) | TasklaneError::NoRefreshToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            TasklaneError::AuthExchange(_)
            | TasklaneError::AuthRefresh(_)
            | TasklaneError::Provider(_) => StatusCode::BAD_GATEWAY,
            TasklaneError::Config(_) | TasklaneError::Network(_) | TasklaneError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }

        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}
