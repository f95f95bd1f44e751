use axum::{http::StatusCode, response::Response};

use crate::envelope::response_error;

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    response_error("Not Found", StatusCode::NOT_FOUND)
}

pub async fn method_not_allowed() -> Response {
    response_error("Method Not Allowed", StatusCode::METHOD_NOT_ALLOWED)
}
