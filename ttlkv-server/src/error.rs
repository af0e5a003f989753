//! Maps store errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use ttlkv_core::StoreError;

/// Error returned by handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            status,
            message: message.into(),
            code,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: &self.message,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            // A missing key is reported as a bad request, as clients of the
            // original HTTP interface expect
            StoreError::KeyNotFound(_) => {
                ApiError::new(StatusCode::BAD_REQUEST, err.to_string(), "KEY_NOT_FOUND")
            }
            StoreError::SnapshotNotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, err.to_string(), "SNAPSHOT_NOT_FOUND")
            }
            StoreError::MalformedSnapshot { .. } => {
                tracing::error!(error = %err, "Snapshot is corrupt");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), "MALFORMED_SNAPSHOT")
            }
            StoreError::Io(_) | StoreError::Serialization(_) => {
                tracing::error!(error = %err, "Snapshot I/O failed");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), "IO_ERROR")
            }
        }
    }
}
