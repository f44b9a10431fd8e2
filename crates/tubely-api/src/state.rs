//! Application state shared by all handlers.

use crate::auth::JwtService;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::{MediaInspector, Remuxer};
use tubely_storage::Storage;

/// Database pool and repositories
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub videos: VideoRepository,
}

/// Everything the upload pipeline touches outside the database
#[derive(Clone)]
pub struct MediaState {
    pub storage: Arc<dyn Storage>,
    pub inspector: Arc<dyn MediaInspector>,
    pub remuxer: Arc<dyn Remuxer>,
    /// Thumbnails are written here and served under `/assets`
    pub assets_root: PathBuf,
    /// Staging directory for video uploads
    pub temp_dir: PathBuf,
    /// Public host in front of the video bucket
    pub cf_distribution: String,
}

pub struct AppState {
    pub config: Config,
    pub auth: JwtService,
    pub db: DbState,
    pub media: MediaState,
}
