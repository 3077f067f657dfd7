//! mediatrack-api - Operator/media tracking service
//!
//! Registers operators, catalogs audio/video media, records playback
//! sessions and events, and serves aggregate statistics over HTTP/JSON.

use anyhow::Result;
use clap::Parser;
use mediatrack_api::{build_router, AppState};
use mediatrack_common::config::{self, Config};
use mediatrack_common::db;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mediatrack-api", version, about = "Operator/media tracking backend")]
struct Args {
    /// Folder holding the database and uploaded files
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Port to listen on
    #[arg(long, default_value_t = 5070)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting mediatrack-api v{}", env!("CARGO_PKG_VERSION"));

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    let config = Config::new(root_folder);
    config.ensure_directories()?;

    let db_path = config.database_path();
    info!("Database path: {}", db_path.display());
    info!("Upload directory: {}", config.upload_dir().display());

    let pool = db::init_database(&db_path).await?;

    // Bootstrap the demo catalog once, before serving requests
    if db::catalog::seed_catalog(&pool).await? {
        info!("Media catalog bootstrapped with sample items");
    }

    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("mediatrack-api listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/api/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
