//! Client-facing API errors

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Errors returned to the caller before any provider is involved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// Required field missing or empty
    BadRequest(&'static str),
    /// Anything other than `POST`/`OPTIONS`
    MethodNotAllowed,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: &'static str,
        }

        let (status, error) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Method fallback for the POST-only endpoints
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Bare `OPTIONS` without CORS preflight headers
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
