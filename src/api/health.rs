//! Liveness and database health endpoints

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::Result;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub message: String,
}

/// GET /
///
/// Liveness message; does not touch the database.
pub async fn read_root() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        message: "safesight backend is running.".to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct DbHealthResponse {
    pub database: String,
}

/// GET /health/db
///
/// Round-trip query against the store; 500 if the database is unreachable.
pub async fn health_db(State(state): State<AppState>) -> Result<Json<DbHealthResponse>> {
    state.store.health_check().await?;
    Ok(Json(DbHealthResponse {
        database: "ok".to_string(),
    }))
}
