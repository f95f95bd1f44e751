//! Products API routes

use axum::Router;
use domain_products::{handlers, PgProductRepository, ProductService};

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let repository =
        PgProductRepository::new(state.db.clone(), state.config.server.public_url.clone());
    let service = ProductService::new(repository);
    handlers::router(service, state.auth.clone())
}
