//! Mapping of resolution errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use termgraph_core::Error;
use tracing::{error, warn};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(Error),
    NotFound(Error),
    Internal(Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn inner(&self) -> &Error {
        match self {
            ApiError::BadRequest(e) | ApiError::NotFound(e) | ApiError::Internal(e) => e,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidIdentifier(_) | Error::InvalidInput(_) => ApiError::BadRequest(err),
            Error::ConfigMissing(_) => ApiError::NotFound(err),
            _ => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let err = self.inner();

        if status.is_server_error() {
            error!(reason = err.reason(), error = %err, "Request failed");
        } else {
            warn!(reason = err.reason(), error = %err, "Request rejected");
        }

        let body = Json(serde_json::json!({
            "error": err.to_string(),
            "reason": err.reason(),
        }));

        (status, body).into_response()
    }
}
