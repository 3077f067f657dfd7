//! Session endpoints: start, event append, end

use axum::extract::State;
use mediatrack_common::{coerce, db::sessions};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{ApiResult, Json};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    #[serde(default, rename = "operatorId", deserialize_with = "coerce::lenient_i64")]
    pub operator_id: i64,
    #[serde(default, rename = "mediaItemId", deserialize_with = "coerce::lenient_i64")]
    pub media_item_id: i64,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub ok: bool,
    #[serde(rename = "sessionId")]
    pub session_id: i64,
}

/// POST /api/sessions/start
pub async fn start(
    State(state): State<AppState>,
    Json(body): Json<StartRequest>,
) -> ApiResult<Json<StartResponse>> {
    let session_id = sessions::start_session(&state.db, body.operator_id, body.media_item_id).await?;

    Ok(Json(StartResponse {
        ok: true,
        session_id,
    }))
}

fn default_payload() -> Value {
    Value::Object(serde_json::Map::new())
}

#[derive(Debug, Deserialize)]
pub struct EventRequest {
    #[serde(default, rename = "sessionId", deserialize_with = "coerce::lenient_i64")]
    pub session_id: i64,
    #[serde(default, rename = "eventType")]
    pub event_type: String,
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub position: f64,
    #[serde(default = "default_payload")]
    pub payload: Value,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// POST /api/sessions/event
pub async fn event(
    State(state): State<AppState>,
    Json(body): Json<EventRequest>,
) -> ApiResult<Json<OkResponse>> {
    sessions::log_event(
        &state.db,
        body.session_id,
        &body.event_type,
        body.position,
        &body.payload,
    )
    .await?;

    Ok(Json(OkResponse { ok: true }))
}

#[derive(Debug, Deserialize)]
pub struct EndRequest {
    #[serde(default, rename = "sessionId", deserialize_with = "coerce::lenient_i64")]
    pub session_id: i64,
    #[serde(default, rename = "lastPosition", deserialize_with = "coerce::lenient_f64")]
    pub last_position: f64,
    #[serde(default, deserialize_with = "coerce::lenient_bool")]
    pub completed: bool,
}

/// POST /api/sessions/end
pub async fn end(
    State(state): State<AppState>,
    Json(body): Json<EndRequest>,
) -> ApiResult<Json<OkResponse>> {
    sessions::end_session(&state.db, body.session_id, body.last_position, body.completed).await?;

    Ok(Json(OkResponse { ok: true }))
}
