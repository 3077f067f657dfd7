//! File upload endpoint
//!
//! Accepts a local audio/video file, stores it under the uploads
//! directory with a collision-resistant name, and registers the
//! corresponding catalog row.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use mediatrack_common::config::UploadPolicy;
use mediatrack_common::db::catalog::{self, NewMediaItem};
use mediatrack_common::db::models::MediaKind;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::api::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    #[serde(rename = "mediaId")]
    pub media_id: i64,
    pub title: String,
    pub kind: MediaKind,
    pub url: String,
}

// A body that blows past the router limit surfaces here as a stream
// read error; keep the 413 envelope for that case.
fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::Validation(format!("Solicitud multipart inválida: {}", err.body_text()))
    }
}

/// POST /api/upload (multipart: `file` plus optional `title`, `genre`,
/// `durationSeconds` fields)
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut file: Option<(String, axum::body::Bytes)> = None;
    let mut title_field = String::new();
    let mut genre_field = String::new();
    let mut duration_seconds: i64 = 0;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name().unwrap_or("") {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                file = Some((filename, data));
            }
            "title" => title_field = field.text().await.unwrap_or_default(),
            "genre" => genre_field = field.text().await.unwrap_or_default(),
            "durationSeconds" => {
                duration_seconds = field
                    .text()
                    .await
                    .ok()
                    .and_then(|s| s.trim().parse::<i64>().ok())
                    .unwrap_or(0);
            }
            _ => {}
        }
    }

    let policy = &state.config.upload;

    let Some((filename, data)) = file else {
        return Err(ApiError::Validation("No se envió ningún archivo.".to_string()));
    };
    if filename.is_empty() {
        return Err(ApiError::Validation("Archivo vacío.".to_string()));
    }
    // Size cap is enforced here before any write; the router body limit
    // is only a transport-level backstop
    if data.len() > policy.max_bytes {
        return Err(ApiError::PayloadTooLarge);
    }
    if !policy.is_allowed(&filename) {
        return Err(ApiError::Validation(format!(
            "Extensión no permitida. Usa: {}",
            policy.allowed_list()
        )));
    }

    // is_allowed guarantees the extension exists
    let ext = UploadPolicy::extension(&filename)
        .ok_or_else(|| ApiError::Validation("Archivo vacío.".to_string()))?;

    let token = Uuid::new_v4().simple().to_string();
    let safe_name = format!("{}.{}", &token[..12], ext);
    let dest = state.config.upload_dir().join(&safe_name);

    tokio::fs::write(&dest, &data)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to store upload: {}", e)))?;

    let kind = policy.kind_for(&filename);
    let title = match title_field.trim() {
        "" => filename
            .rsplit_once('.')
            .map(|(stem, _)| stem.to_string())
            .unwrap_or_else(|| filename.clone()),
        t => t.to_string(),
    };
    let genre = match genre_field.trim() {
        "" => "Local".to_string(),
        g => g.to_string(),
    };
    let source_url = format!("/static/uploads/{}", safe_name);

    // Built directly: upload-derived titles skip the catalog's
    // non-empty-title rule, as the form field is optional
    let item = NewMediaItem {
        title: title.clone(),
        kind,
        source_url: source_url.clone(),
        duration_seconds,
        genre,
    };
    let media_id = catalog::insert_media(&state.db, &item).await?;

    info!(
        "Stored upload {} ({} bytes) as media item {}",
        safe_name,
        data.len(),
        media_id
    );

    Ok(Json(UploadResponse {
        ok: true,
        media_id,
        title,
        kind,
        url: source_url,
    }))
}
