//! Health check endpoints

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use axum_helpers::{health_router, run_health_checks, HealthCheckFuture};
use database::postgres::check_health;
use sea_orm::DatabaseConnection;

use crate::state::AppState;

async fn ready(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    let database: HealthCheckFuture = Box::pin(async move {
        check_health(&db).await.map_err(|e| e.to_string())
    });

    run_health_checks(vec![("database", database)]).await
}

/// `GET /health` (liveness) and `GET /ready` (database ping)
pub fn router(state: &AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state.db.clone())
        .merge(health_router(state.config.app.clone()))
}
