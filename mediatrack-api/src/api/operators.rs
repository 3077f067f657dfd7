//! Operator endpoints: registration and history

use axum::extract::{Path, Query, State};
use mediatrack_common::db::operators::{self, HistoryRow, DEFAULT_HISTORY_LIMIT};
use serde::{Deserialize, Serialize};

use crate::api::{ApiResult, Json};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dni: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub ok: bool,
    #[serde(rename = "operatorId")]
    pub operator_id: i64,
    pub name: String,
    pub dni: String,
}

/// POST /api/operators/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    let op = operators::register_operator(&state.db, &body.name, &body.dni).await?;

    Ok(Json(RegisterResponse {
        ok: true,
        operator_id: op.id,
        name: op.name,
        dni: op.dni,
    }))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub ok: bool,
    pub sessions: Vec<HistoryRow>,
}

/// GET /api/operators/:id/history
pub async fn history(
    State(state): State<AppState>,
    Path(operator_id): Path<i64>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<HistoryResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let sessions = operators::operator_history(&state.db, operator_id, limit).await?;

    Ok(Json(HistoryResponse { ok: true, sessions }))
}
