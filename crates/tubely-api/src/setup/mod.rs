//! Application setup and initialization
//!
//! Everything `main` needs to turn a `Config` into a running router.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::auth::JwtService;
use crate::state::{AppState, DbState, MediaState};
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::{FfmpegRemuxer, FfprobeInspector};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_json());

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;
    storage::prepare_directories(&config).await?;

    let inspector = FfprobeInspector::new(config.ffprobe_path())
        .context("Invalid FFPROBE_PATH")?;
    let remuxer = FfmpegRemuxer::new(config.ffmpeg_path()).context("Invalid FFMPEG_PATH")?;

    let state = Arc::new(AppState {
        auth: JwtService::new(config.jwt_secret()),
        db: DbState {
            videos: VideoRepository::new(pool.clone()),
            pool,
        },
        media: MediaState {
            storage,
            inspector: Arc::new(inspector),
            remuxer: Arc::new(remuxer),
            assets_root: config.assets_root().clone(),
            temp_dir: config.temp_dir().clone(),
            cf_distribution: config.s3_cf_distribution().to_string(),
        },
        config,
    });

    let router = routes::setup_routes(&state.config, state.clone()).await?;

    Ok((state, router))
}
