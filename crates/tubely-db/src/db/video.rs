//! Video metadata repository: CRUD for the videos table.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool};
use tubely_core::{AppError, CreateVideoParams, Video};
use uuid::Uuid;

/// Row type for the videos table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct VideoRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub user_id: Uuid,
}

impl VideoRow {
    pub fn to_video(self) -> Video {
        Video {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            title: self.title,
            description: self.description,
            thumbnail_url: self.thumbnail_url,
            video_url: self.video_url,
            user_id: self.user_id,
        }
    }
}

const VIDEO_COLUMNS: &str =
    "id, created_at, updated_at, title, description, thumbnail_url, video_url, user_id";

/// Repository for the videos table.
#[derive(Clone)]
pub struct VideoRepository {
    pool: SqlitePool,
}

impl VideoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new video record with empty media URLs.
    #[tracing::instrument(skip(self, params), fields(db.table = "videos", user_id = %params.user_id))]
    pub async fn create_video(&self, params: CreateVideoParams) -> Result<Video, AppError> {
        let now = Utc::now();
        let row: VideoRow = sqlx::query_as::<Sqlite, VideoRow>(&format!(
            r#"
            INSERT INTO videos (id, created_at, updated_at, title, description, user_id)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {VIDEO_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(now)
        .bind(now)
        .bind(&params.title)
        .bind(&params.description)
        .bind(params.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.to_video())
    }

    /// Fetch a video by id.
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.record_id = %id))]
    pub async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let row: Option<VideoRow> = sqlx::query_as::<Sqlite, VideoRow>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(VideoRow::to_video))
    }

    /// Persist the mutable fields of `video` and return the stored record.
    ///
    /// `updated_at` is refreshed. Fails with [`AppError::NotFound`] when no row
    /// matches `video.id`.
    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.record_id = %video.id))]
    pub async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        let row: Option<VideoRow> = sqlx::query_as::<Sqlite, VideoRow>(&format!(
            r#"
            UPDATE videos
            SET title = ?, description = ?, thumbnail_url = ?, video_url = ?, updated_at = ?
            WHERE id = ?
            RETURNING {VIDEO_COLUMNS}
            "#
        ))
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(Utc::now())
        .bind(video.id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(VideoRow::to_video)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video.id)))
    }
}
