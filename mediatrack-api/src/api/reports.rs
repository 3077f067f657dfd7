//! Reporting endpoints: leaderboard and global totals

use axum::{extract::State, Json};
use mediatrack_common::db::reports::{self, LeaderRow, Totals};
use serde::Serialize;

use crate::api::ApiResult;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub ok: bool,
    pub leaders: Vec<LeaderRow>,
}

/// GET /api/leaderboard
pub async fn leaderboard(State(state): State<AppState>) -> ApiResult<Json<LeaderboardResponse>> {
    let leaders = reports::leaderboard(&state.db).await?;

    Ok(Json(LeaderboardResponse { ok: true, leaders }))
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub ok: bool,
    pub stats: Totals,
}

/// GET /api/stats
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    let stats = reports::totals(&state.db).await?;

    Ok(Json(StatsResponse { ok: true, stats }))
}
