//! The `{success, message, data}` envelope every JSON endpoint answers with.
//!
//! ```json
//! { "success": true, "message": "Product Details Fetch Successfully !", "data": { "id": 1 } }
//! { "success": false, "message": "Product Not Found", "data": null }
//! ```
//!
//! Input validation failures additionally carry an `errors` object keyed by field.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const INVALID_INPUT_MESSAGE: &str = "The given data was invalid.";

/// Uniform response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    /// Field name to messages; present only on invalid input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn new(success: bool, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            data,
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: serde_json::Value) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// Single construction point for enveloped responses.
pub fn respond<T: Serialize>(
    success: bool,
    data: Option<T>,
    message: impl Into<String>,
    status: StatusCode,
) -> Response {
    (status, Json(ApiResponse::new(success, data, message))).into_response()
}

/// `200 OK` with `success: true`.
pub fn response_success<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    respond(true, Some(data), message, StatusCode::OK)
}

/// `success: false` with `data: null`.
pub fn response_error(message: impl Into<String>, status: StatusCode) -> Response {
    respond::<()>(false, None, message, status)
}

/// `422` carrying per-field messages.
pub fn response_invalid(message: impl Into<String>, errors: serde_json::Value) -> Response {
    let body = ApiResponse::<()>::new(false, None, message).with_errors(errors);
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
}
