//! Reusable OpenAPI response types for failure envelopes.

#[allow(unused_imports)]
use serde_json::json;
use serde::Serialize;
use utoipa::{ToResponse, ToSchema};

/// Shape of every failure body.
#[derive(Serialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Always `false`
    pub success: bool,
    pub message: String,
    /// Always `null`
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
    /// Present on invalid input only
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<serde_json::Value>,
}

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Failed to delete the product.",
        "data": null
    })
)]
pub struct InternalServerErrorResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Invalid input",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "The given data was invalid.",
        "data": null,
        "errors": {
            "title": ["The title field is required."],
            "price": ["The price field must be at least 0."]
        }
    })
)]
pub struct InvalidInputResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed id",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Invalid id: abc",
        "data": null
    })
)]
pub struct BadRequestIdResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Product Not Found",
        "data": null
    })
)]
pub struct NotFoundResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Missing or invalid bearer token",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Unauthenticated.",
        "data": null
    })
)]
pub struct UnauthorizedResponse(pub ErrorEnvelope);
