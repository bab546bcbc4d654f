//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// `GET /health` - liveness plus a database ping.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = if state.db.health_check().await {
        "up"
    } else {
        "down"
    };

    Json(HealthResponse {
        status: "ok",
        database,
    })
}
