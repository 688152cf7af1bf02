//! Readiness endpoint

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::mongodb::check_health;

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let database = state.config.mongodb.database().to_string();
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "mongodb",
        Box::pin(async move { check_health(&state.mongo_client, &database).await }),
    )];

    match run_health_checks(checks).await {
        Ok(ready) => ready,
        Err(unavailable) => unavailable,
    }
}

/// `/ready`, answering 503 while MongoDB does not respond to ping
pub fn ready_router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
