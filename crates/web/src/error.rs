//! Error responses for the web front end.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Application error type for request handlers.
///
/// Bodies are plain text; this is an HTML-form application, not a JSON API.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request was rejected before reaching the store.
    #[error("{0}")]
    BadRequest(String),

    /// The event store or the template engine failed.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// The HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<openspace_events::Error> for AppError {
    fn from(err: openspace_events::Error) -> Self {
        Self::Internal(format!("event store failure: {err}"))
    }
}

impl From<minijinja::Error> for AppError {
    fn from(err: minijinja::Error) -> Self {
        Self::Internal(format!("template rendering failed: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::BadRequest("Space name is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
