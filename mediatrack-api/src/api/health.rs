//! Health check endpoint

use axum::{extract::State, Json};
use mediatrack_common::time;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub db: String,
    pub utc: String,
}

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db = state
        .config
        .database_path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Json(HealthResponse {
        ok: true,
        db,
        utc: time::now_iso(),
    })
}
