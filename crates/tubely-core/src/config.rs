//! Configuration module
//!
//! Server, authentication, storage and media-tool settings, loaded from the
//! environment (and an optional `.env` file).

use std::env;
use std::path::PathBuf;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 8091;
const MAX_CONNECTIONS: u32 = 5;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;
const MAX_THUMBNAIL_SIZE_MB: usize = 10;
const MAX_VIDEO_SIZE_MB: usize = 1024;
const DATABASE_URL: &str = "sqlite://tubely.db?mode=rwc";
const ASSETS_ROOT: &str = "./assets";

/// Settings shared by any HTTP service in the workspace
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub environment: String,
    // LOG_FORMAT=json switches console logs to JSON lines
    pub log_json: bool,
    pub http_concurrency_limit: usize,
}

/// Upload pipeline configuration
#[derive(Clone, Debug)]
pub struct MediaConfig {
    pub base: BaseConfig,
    pub database_url: String,
    // Thumbnails are written here and served under /assets
    pub assets_root: PathBuf,
    // Staging directory for raw and remuxed video uploads
    pub temp_dir: PathBuf,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub aws_region: Option<String>,
    pub s3_cf_distribution: String,
    pub local_storage_path: Option<String>,
    // External tools
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    // Upload limits
    pub max_thumbnail_size_bytes: usize,
    pub max_video_size_bytes: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<MediaConfig>);

impl Config {
    fn as_media(&self) -> &MediaConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.as_media().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = MediaConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_media().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_media().base.server_port
    }

    pub fn jwt_secret(&self) -> &str {
        &self.as_media().base.jwt_secret
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_media().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_media().base.environment
    }

    pub fn log_json(&self) -> bool {
        self.as_media().base.log_json
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_media().base.http_concurrency_limit
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_media().base.db_max_connections
    }

    pub fn database_url(&self) -> &str {
        &self.as_media().database_url
    }

    pub fn assets_root(&self) -> &PathBuf {
        &self.as_media().assets_root
    }

    pub fn temp_dir(&self) -> &PathBuf {
        &self.as_media().temp_dir
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.as_media().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_media().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.as_media().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_media().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.as_media().aws_region.as_deref()
    }

    pub fn s3_cf_distribution(&self) -> &str {
        &self.as_media().s3_cf_distribution
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_media().local_storage_path.as_deref()
    }

    pub fn ffmpeg_path(&self) -> &str {
        &self.as_media().ffmpeg_path
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.as_media().ffprobe_path
    }

    pub fn max_thumbnail_size_bytes(&self) -> usize {
        self.as_media().max_thumbnail_size_bytes
    }

    pub fn max_video_size_bytes(&self) -> usize {
        self.as_media().max_video_size_bytes
    }
}

fn is_production_env(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn megabytes_to_bytes(name: &str, megabytes: usize) -> Result<usize, anyhow::Error> {
    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("{} is too large", name))
}

impl MediaConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            environment,
            log_json: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
        };

        let storage_backend = optional_var("STORAGE_BACKEND")
            .map(|s| s.parse::<StorageBackend>())
            .transpose()?;

        let max_thumbnail_size_mb = env::var("MAX_THUMBNAIL_SIZE_MB")
            .unwrap_or_else(|_| MAX_THUMBNAIL_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_THUMBNAIL_SIZE_MB);

        let max_video_size_mb = env::var("MAX_VIDEO_SIZE_MB")
            .unwrap_or_else(|_| MAX_VIDEO_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_VIDEO_SIZE_MB);

        let config = MediaConfig {
            base,
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| DATABASE_URL.to_string()),
            assets_root: PathBuf::from(
                env::var("ASSETS_ROOT").unwrap_or_else(|_| ASSETS_ROOT.to_string()),
            ),
            temp_dir: optional_var("TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            storage_backend,
            s3_bucket: optional_var("S3_BUCKET"),
            s3_region: optional_var("S3_REGION"),
            s3_endpoint: optional_var("S3_ENDPOINT"),
            aws_region: optional_var("AWS_REGION"),
            s3_cf_distribution: env::var("S3_CF_DISTRIBUTION").map_err(|_| {
                anyhow::anyhow!("S3_CF_DISTRIBUTION must be set to build public video URLs")
            })?,
            local_storage_path: optional_var("LOCAL_STORAGE_PATH"),
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            ffprobe_path: env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string()),
            max_thumbnail_size_bytes: megabytes_to_bytes(
                "MAX_THUMBNAIL_SIZE_MB",
                max_thumbnail_size_mb,
            )?,
            max_video_size_bytes: megabytes_to_bytes("MAX_VIDEO_SIZE_MB", max_video_size_mb)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.is_empty() {
            return Err(anyhow::anyhow!("JWT_SECRET must not be empty"));
        }

        if is_production_env(&self.base.environment)
            && self.base.cors_origins.iter().any(|o| o == "*")
        {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if !self.database_url.starts_with("sqlite:") {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid SQLite connection string"
            ));
        }

        if self.s3_cf_distribution.trim().is_empty() {
            return Err(anyhow::anyhow!("S3_CF_DISTRIBUTION must not be empty"));
        }

        if self.max_thumbnail_size_bytes == 0 || self.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("Upload size limits must be greater than zero"));
        }

        // Validate storage backend configuration
        let backend = self.storage_backend.unwrap_or(StorageBackend::S3);
        match backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
