//! Conversion of errors into JSON error responses at the HTTP boundary

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use super::{AdBundleError, ErrorKind, request};

impl ErrorKind {
    /// HTTP status reported for this class of error
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::ExternalTool | ErrorKind::Persistence | ErrorKind::Configuration => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AdBundleError {
    fn into_response(self) -> Response {
        let status = self.kind().status();
        if status.is_server_error() {
            tracing::error!(kind = ?self.kind(), "{}", self);
        } else {
            tracing::warn!(kind = ?self.kind(), "{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for AdBundleError {
    fn from(rejection: JsonRejection) -> Self {
        request::invalid(rejection.body_text())
    }
}

impl From<MultipartRejection> for AdBundleError {
    fn from(rejection: MultipartRejection) -> Self {
        request::invalid(rejection.body_text())
    }
}

impl From<MultipartError> for AdBundleError {
    fn from(err: MultipartError) -> Self {
        request::invalid(err.body_text())
    }
}
