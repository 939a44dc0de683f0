//! Response mapping for dispatch failures.
//!
//! # Status Codes
//! - `RouteNotFound` → 404 Not Found
//! - `MethodNotAllowed` → 405 Method Not Allowed, with `Allow` header
//! - `ResponseInvalid` → 500 Internal Server Error
//!
//! Error bodies are plain text; successful bodies are JSON.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::routing::DispatchError;

/// Wrap a normalized body in a `200 OK` JSON response.
pub fn json_body(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response()
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        match self {
            DispatchError::RouteNotFound => {
                (StatusCode::NOT_FOUND, "404 page not found").into_response()
            }
            DispatchError::MethodNotAllowed { expected } => {
                let mut response = (
                    StatusCode::METHOD_NOT_ALLOWED,
                    format!("Method not allowed, expected: {}", expected),
                )
                    .into_response();
                if let Ok(allow) = HeaderValue::from_str(&expected) {
                    response.headers_mut().insert(header::ALLOW, allow);
                }
                response
            }
            DispatchError::ResponseInvalid { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error: Invalid JSON response",
            )
                .into_response(),
        }
    }
}
