pub mod handlers;
pub mod responses;
pub mod validation;

pub use responses::ErrorEnvelope;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::envelope::{INVALID_INPUT_MESSAGE, response_error, response_invalid};

pub const UNAUTHENTICATED_MESSAGE: &str = "Unauthenticated.";

/// Cross-cutting HTTP error, rendered through the response envelope.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::JsonExtractorRejection(rejection) => {
                tracing::info!(status = %rejection.status(), "Rejected request body: {}", rejection.body_text());
                match &rejection {
                    JsonRejection::MissingJsonContentType(_) => {
                        response_error(rejection.body_text(), rejection.status())
                    }
                    _ => response_invalid(
                        rejection.body_text(),
                        serde_json::json!({ "body": [rejection.body_text()] }),
                    ),
                }
            }
            AppError::ValidationError(errors) => {
                tracing::info!("Validation failed: {}", errors);
                response_invalid(INVALID_INPUT_MESSAGE, validation::field_messages(&errors))
            }
            AppError::InvalidId(raw) => {
                tracing::info!("Invalid id in path: {}", raw);
                response_error(format!("Invalid id: {}", raw), StatusCode::BAD_REQUEST)
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                response_error(msg, StatusCode::BAD_REQUEST)
            }
            AppError::Unauthorized(msg) => {
                tracing::info!("Unauthorized: {}", msg);
                response_error(UNAUTHENTICATED_MESSAGE, StatusCode::UNAUTHORIZED)
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                response_error(msg, StatusCode::NOT_FOUND)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                response_error(msg, StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
