use crate::error::NameForgeError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Body of every failed API call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler error, rendered as `{ "error": ... }` with a matching status
#[derive(Debug)]
pub struct ApiError(pub NameForgeError);

impl From<NameForgeError> for ApiError {
    fn from(err: NameForgeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_client_error() {
            tracing::debug!(status = %status.as_u16(), error = %self.0, "Request rejected");
        } else if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), error = %self.0, "Request failed");
        } else {
            tracing::info!(status = %status.as_u16(), error = %self.0, "Request not served");
        }

        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}
