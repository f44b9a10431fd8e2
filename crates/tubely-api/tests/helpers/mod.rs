//! Test helpers: build AppState and router for integration tests.
//!
//! Every `TestApp` gets its own in-memory SQLite database and scratch directories, and
//! swaps ffprobe/ffmpeg for in-process fakes.

#![allow(dead_code)]

pub mod auth;
pub mod fixtures;
pub mod media;

use axum_test::TestServer;
use media::{FakeInspector, FakeRemuxer};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::auth::JwtService;
use tubely_api::setup::routes;
use tubely_api::state::{AppState, DbState, MediaState};
use tubely_core::{BaseConfig, Config, MediaConfig, StorageBackend};
use tubely_db::VideoRepository;
use tubely_storage::{LocalStorage, Storage};

pub const TEST_CF_DISTRIBUTION: &str = "d111111abcdef8.cloudfront.net";
/// Thumbnail cap used by the test router, small enough to exceed cheaply
pub const TEST_MAX_THUMBNAIL_BYTES: usize = 64 * 1024;

/// Test application: server, pool, and owned scratch directories.
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub videos: VideoRepository,
    pub assets_root: PathBuf,
    pub temp_dir: PathBuf,
    pub storage_root: PathBuf,
    pub _dirs: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup a test app whose fake inspector reports 1920x1080.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(FakeInspector::reporting(1920, 1080), FakeRemuxer::default()).await
}

/// Setup a test app whose fake inspector reports the given dimensions.
pub async fn setup_test_app_with_dimensions(width: u32, height: u32) -> TestApp {
    setup_test_app_with(FakeInspector::reporting(width, height), FakeRemuxer::default()).await
}

pub async fn setup_test_app_with(inspector: FakeInspector, remuxer: FakeRemuxer) -> TestApp {
    build_test_app(inspector, remuxer, None).await
}

/// Setup a test app whose object store is `storage` instead of a local directory.
pub async fn setup_test_app_with_storage(storage: Arc<dyn Storage>) -> TestApp {
    build_test_app(
        FakeInspector::reporting(1920, 1080),
        FakeRemuxer::default(),
        Some(storage),
    )
    .await
}

async fn build_test_app(
    inspector: FakeInspector,
    remuxer: FakeRemuxer,
    storage: Option<Arc<dyn Storage>>,
) -> TestApp {
    let dirs = tempfile::tempdir().expect("Failed to create temp directory");
    let assets_root = dirs.path().join("assets");
    let temp_dir = dirs.path().join("tmp");
    let storage_root = dirs.path().join("bucket");
    for dir in [&assets_root, &temp_dir] {
        std::fs::create_dir_all(dir).expect("Failed to create test directory");
    }

    // One connection so every query sees the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    tubely_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let storage: Arc<dyn Storage> = match storage {
        Some(storage) => storage,
        None => Arc::new(
            LocalStorage::new(storage_root.clone())
                .await
                .expect("Failed to create local storage"),
        ),
    };

    let config = create_test_config(&assets_root, &temp_dir, &storage_root);
    let videos = VideoRepository::new(pool.clone());

    let state = Arc::new(AppState {
        auth: JwtService::new(auth::TEST_JWT_SECRET),
        db: DbState {
            pool: pool.clone(),
            videos: videos.clone(),
        },
        media: MediaState {
            storage,
            inspector: Arc::new(inspector),
            remuxer: Arc::new(remuxer),
            assets_root: assets_root.clone(),
            temp_dir: temp_dir.clone(),
            cf_distribution: TEST_CF_DISTRIBUTION.to_string(),
        },
        config: config.clone(),
    });

    let router = routes::setup_routes(&config, state)
        .await
        .expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        pool,
        videos,
        assets_root,
        temp_dir,
        storage_root,
        _dirs: dirs,
    }
}

pub fn create_test_config(assets_root: &Path, temp_dir: &Path, storage_root: &Path) -> Config {
    Config(Box::new(MediaConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 1,
            jwt_secret: auth::TEST_JWT_SECRET.to_string(),
            environment: "test".to_string(),
            log_json: false,
            http_concurrency_limit: 16,
        },
        database_url: "sqlite::memory:".to_string(),
        assets_root: assets_root.to_path_buf(),
        temp_dir: temp_dir.to_path_buf(),
        storage_backend: Some(StorageBackend::Local),
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        aws_region: None,
        s3_cf_distribution: TEST_CF_DISTRIBUTION.to_string(),
        local_storage_path: Some(storage_root.display().to_string()),
        ffmpeg_path: "ffmpeg".to_string(),
        ffprobe_path: "ffprobe".to_string(),
        max_thumbnail_size_bytes: TEST_MAX_THUMBNAIL_BYTES,
        max_video_size_bytes: 64 * 1024 * 1024,
    }))
}

/// Make every `UPDATE` on `videos` fail while reads keep working.
pub async fn reject_video_updates(pool: &SqlitePool) {
    sqlx::query(
        "CREATE TRIGGER reject_video_updates BEFORE UPDATE ON videos \
         BEGIN SELECT RAISE(ABORT, 'videos are read-only'); END",
    )
    .execute(pool)
    .await
    .expect("Failed to install update trigger");
}

/// Every regular file below `dir`, relative to it, sorted.
pub fn files_under(dir: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(root, &path, out);
            } else if let Ok(relative) = path.strip_prefix(root) {
                out.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }
    }

    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}

