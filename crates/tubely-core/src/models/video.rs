use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata record for an uploaded video.
///
/// Only the owning user (`user_id`) may change `thumbnail_url` or `video_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub user_id: Uuid,
}

impl Video {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVideoParams {
    pub title: String,
    pub description: String,
    pub user_id: Uuid,
}
