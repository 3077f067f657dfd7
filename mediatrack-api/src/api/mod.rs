//! HTTP API: one module per endpoint group
//!
//! Every response carries the `{ok: true, ...}` envelope on success and
//! `{ok: false, error}` on failure.

pub mod health;
pub mod media;
pub mod operators;
pub mod reports;
pub mod seed;
pub mod sessions;
pub mod upload;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mediatrack_common::Error;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use thiserror::Error as ThisError;
use tracing::error;

/// API error type: maps store-layer errors onto the response envelope
#[derive(Debug, ThisError)]
pub enum ApiError {
    /// Missing or malformed required field (400)
    #[error("{0}")]
    Validation(String),

    /// Upload exceeds the size cap (413)
    #[error("El archivo supera el tamaño máximo permitido.")]
    PayloadTooLarge,

    /// Store or disk failure (500); fatal for the request, not the process
    #[error("{0}")]
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(msg) => ApiError::Validation(msg),
            Error::PayloadTooLarge => ApiError::PayloadTooLarge,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(msg) => {
                error!("Request failed: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "ok": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON extractor/response that keeps the error envelope.
///
/// axum's own `Json` rejects malformed bodies with a plain-text response;
/// this wrapper turns those rejections into the `{ok: false, error}` shape
/// like every other API error, keeping the Spanish validation message and
/// a 413 when the body blows past the transport limit.
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(ApiError::PayloadTooLarge)
            }
            Err(rejection) => Err(ApiError::Validation(format!(
                "Cuerpo JSON inválido: {}",
                rejection.body_text()
            ))),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
