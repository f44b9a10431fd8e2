use crate::error::HttpAppError;
use crate::handlers::parse_video_id;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use tubely_core::{AppError, Video};

const THUMBNAIL_FIELD: &str = "thumbnail";

/// File extension (with leading dot) registered for a MIME type, parameters ignored.
///
/// When several extensions are registered the first one wins, so `image/png` maps to `.png`.
pub(crate) fn extension_for_content_type(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next()?.trim().to_ascii_lowercase();
    if essence.is_empty() {
        return None;
    }
    mime_guess::get_mime_extensions_str(&essence)
        .and_then(|exts| exts.first())
        .map(|ext| format!(".{}", ext))
}

struct ThumbnailPart {
    content_type: Option<String>,
    data: Vec<u8>,
}

async fn read_thumbnail_part(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ThumbnailPart, AppError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Multipart extraction rejected");
        AppError::InvalidInput("Unable to parse form".to_string())
    })?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to read multipart");
        AppError::InvalidInput("Unable to parse form".to_string())
    })? {
        if field.name() != Some(THUMBNAIL_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(|s| s.to_string());
        let data = field.bytes().await.map_err(|e| {
            tracing::debug!(error = %e, "Failed to read thumbnail data");
            AppError::InvalidInput("Unable to parse form".to_string())
        })?;

        return Ok(ThumbnailPart {
            content_type,
            data: data.to_vec(),
        });
    }

    Err(AppError::InvalidInput(
        "Unable to parse form file".to_string(),
    ))
}

/// `POST /videos/{video_id}/thumbnail`
///
/// Stores the `thumbnail` form file as `<assets_root>/<video_id><ext>` and points the
/// video's `thumbnail_url` at `/assets/<video_id><ext>`.
#[tracing::instrument(skip_all, fields(video_id = %video_id))]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    let user_id = state.auth.authenticate(&headers)?;

    tracing::info!(%video_id, %user_id, "Uploading thumbnail");

    let part = read_thumbnail_part(multipart).await?;

    let mut video = match state.db.videos.get_video(video_id).await {
        Ok(Some(video)) => video,
        Ok(None) => {
            return Err(AppError::Unauthorized("Couldn't get video".to_string()).into());
        }
        Err(e) => {
            tracing::error!(error = %e, %video_id, "Video lookup failed");
            return Err(AppError::Unauthorized("Couldn't get video".to_string()).into());
        }
    };

    if !video.is_owned_by(user_id) {
        return Err(AppError::Unauthorized("User is not video owner".to_string()).into());
    }

    let extension = part
        .content_type
        .as_deref()
        .and_then(extension_for_content_type)
        .ok_or_else(|| AppError::InvalidInput("Invalid file extension".to_string()))?;

    let filename = format!("{}{}", video_id, extension);
    let path = state.media.assets_root.join(&filename);
    tokio::fs::write(&path, &part.data)
        .await
        .map_err(|e| AppError::internal("Error writing file", e))?;

    tracing::debug!(
        path = %path.display(),
        size_bytes = part.data.len(),
        "Thumbnail written"
    );

    video.thumbnail_url = Some(format!("/assets/{}", filename));
    let video = state
        .db
        .videos
        .update_video(&video)
        .await
        .map_err(|e| AppError::internal("Couldn't update video", e))?;

    Ok(Json(video))
}
