//! # Axum Helpers
//!
//! Shared building blocks for the catalog HTTP services.
//!
//! - **[`envelope`]**: the `{success, message, data}` response body
//! - **[`errors`]**: [`AppError`] and OpenAPI response docs
//! - **[`extractors`]**: integer path ids, query strings, validated JSON
//! - **[`auth`]**: bearer-token verification middleware
//! - **[`http`]**: CORS and security headers
//! - **[`server`]**: documented router, health, graceful shutdown
//! - **[`audit`]**: audit log events

pub mod audit;
pub mod auth;
pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{JwtAuth, JwtClaims, JwtConfig, jwt_auth_middleware};

pub use envelope::{
    ApiResponse, INVALID_INPUT_MESSAGE, respond, response_error, response_invalid,
    response_success,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

pub use errors::{AppError, ErrorEnvelope, UNAUTHENTICATED_MESSAGE};

pub use extractors::{IdPath, QueryParams, ValidatedJson};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
