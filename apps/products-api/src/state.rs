//! Application state management

use axum_helpers::JwtAuth;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: DatabaseConnection,
    pub auth: JwtAuth,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> Self {
        let auth = JwtAuth::new(&config.jwt);
        Self {
            config: Arc::new(config),
            db,
            auth,
        }
    }
}
