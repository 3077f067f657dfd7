//! mediatrack-api library - HTTP service for the mediatrack backend
//!
//! Exposes the router and application state so integration tests can
//! drive the service without binding a socket.

pub mod api;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use mediatrack_common::config::Config;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Resolved paths and upload policy
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    // Cap slightly above the policy limit so the handler's own size
    // check decides the cap; the router limit only stops runaway bodies
    let upload_limit = state.config.upload.max_bytes + 2 * 1024 * 1024;
    let upload_dir = state.config.upload_dir();

    Router::new()
        .route("/api/operators/register", post(api::operators::register))
        .route("/api/operators/:id/history", get(api::operators::history))
        .route("/api/media", get(api::media::list).post(api::media::create))
        .route("/api/import", post(api::media::import))
        .route("/api/sessions/start", post(api::sessions::start))
        .route("/api/sessions/event", post(api::sessions::event))
        .route("/api/sessions/end", post(api::sessions::end))
        .route("/api/leaderboard", get(api::reports::leaderboard))
        .route("/api/stats", get(api::reports::stats))
        .route("/api/seed", post(api::seed::seed_demo))
        .route("/api/health", get(api::health::health_check))
        .route(
            "/api/upload",
            post(api::upload::upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Uploaded files are served back under the same public path that
        // media_items.source_url records
        .nest_service("/static/uploads", ServeDir::new(upload_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
