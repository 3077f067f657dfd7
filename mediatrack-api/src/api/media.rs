//! Media catalog endpoints: listing, creation and bulk import

use axum::extract::{Query, State};
use mediatrack_common::coerce;
use mediatrack_common::db::catalog::{self, MediaImportRow, NewMediaItem};
use mediatrack_common::db::models::{MediaItem, MediaKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{ApiError, ApiResult, Json};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub ok: bool,
    pub items: Vec<MediaItem>,
}

/// GET /api/media?kind=audio|video
///
/// An unknown kind value is ignored rather than rejected; the full
/// catalog is returned in that case.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListResponse>> {
    let kind = query.kind.as_deref().and_then(MediaKind::parse);
    let items = catalog::list_media(&state.db, kind).await?;

    Ok(Json(ListResponse { ok: true, items }))
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default, rename = "sourceUrl")]
    pub source_url: String,
    #[serde(default, rename = "durationSeconds", deserialize_with = "coerce::lenient_i64")]
    pub duration_seconds: i64,
    #[serde(default)]
    pub genre: String,
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub ok: bool,
    #[serde(rename = "mediaId")]
    pub media_id: i64,
}

/// POST /api/media
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateRequest>,
) -> ApiResult<Json<CreateResponse>> {
    let item = NewMediaItem::validated(
        &body.title,
        &body.kind,
        &body.source_url,
        body.duration_seconds,
        &body.genre,
    )?;
    let media_id = catalog::insert_media(&state.db, &item).await?;

    Ok(Json(CreateResponse { ok: true, media_id }))
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub ok: bool,
    pub imported: u32,
}

/// POST /api/import
///
/// Re-insert media items from a JSON export. A `media` value that is
/// present but not a list is rejected; rows failing validation are
/// skipped silently and the count reflects rows actually inserted.
pub async fn import(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Json<ImportResponse>> {
    let rows: Vec<MediaImportRow> = match body.get("media") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        Some(_) => {
            return Err(ApiError::Validation(
                "Se esperaba una lista de medios.".to_string(),
            ))
        }
    };
    let imported = catalog::bulk_import(&state.db, &rows).await?;

    Ok(Json(ImportResponse { ok: true, imported }))
}
