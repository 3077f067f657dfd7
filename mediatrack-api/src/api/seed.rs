//! Demo-data endpoint
//!
//! POST /api/seed generates randomized demo fixtures. Kept apart from
//! the core endpoints; see `mediatrack_common::db::demo`.

use axum::{extract::State, Json};
use mediatrack_common::db::demo;
use serde::Serialize;

use crate::api::ApiResult;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub ok: bool,
    pub message: String,
}

/// POST /api/seed
pub async fn seed_demo(State(state): State<AppState>) -> ApiResult<Json<SeedResponse>> {
    demo::seed_demo(&state.db).await?;

    Ok(Json(SeedResponse {
        ok: true,
        message: "Demo data seeded.".to_string(),
    }))
}
