use crate::error::HttpAppError;
use crate::handlers::parse_video_id;
use crate::state::AppState;
use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        Multipart, Path, State,
    },
    http::{HeaderMap, StatusCode},
};
use mime_guess::mime::Mime;
use std::path::Path as FsPath;
use std::sync::Arc;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use tubely_core::AppError;
use tubely_storage::video_key;

const VIDEO_FIELD: &str = "video";
const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Accept only `video/mp4`, parameters allowed.
pub(crate) fn check_video_content_type(content_type: Option<&str>) -> Result<(), AppError> {
    let mime: Mime = content_type
        .ok_or_else(|| AppError::InvalidInput("Invalid Content-Type".to_string()))?
        .parse()
        .map_err(|_| AppError::InvalidInput("Invalid Content-Type".to_string()))?;

    if mime.essence_str() != VIDEO_CONTENT_TYPE {
        return Err(AppError::InvalidInput(
            "Invalid file type, only MP4 is allowed".to_string(),
        ));
    }
    Ok(())
}

/// Stream a multipart field into a fresh temp file under `dir`.
///
/// The returned path deletes the file when dropped.
async fn stage_upload(field: &mut Field<'_>, dir: &FsPath) -> Result<(TempPath, u64), AppError> {
    let (file, temp_path) = tempfile::Builder::new()
        .prefix("tubely-upload")
        .suffix(".mp4")
        .tempfile_in(dir)
        .map_err(|e| AppError::internal("Could not create temp file", e))?
        .into_parts();

    let mut file = tokio::fs::File::from_std(file);
    let mut written: u64 = 0;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::internal("Could not write file to disk", e))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::internal("Could not write file to disk", e))?;
        written += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| AppError::internal("Could not write file to disk", e))?;

    Ok((temp_path, written))
}

/// `POST /videos/{video_id}/video`
///
/// Stages the `video` form file on disk, classifies its aspect ratio, remuxes it for
/// fast start, uploads it to `<prefix><user_id>/<video_id>.mp4` and records the public
/// URL. Staged and remuxed files are removed on every exit path.
#[tracing::instrument(skip_all, fields(video_id = %video_id))]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<StatusCode, HttpAppError> {
    let start = std::time::Instant::now();
    let video_id = parse_video_id(&video_id)?;
    let user_id = state.auth.authenticate(&headers)?;

    let mut video = match state.db.videos.get_video(video_id).await {
        Ok(Some(video)) => video,
        Ok(None) => {
            return Err(AppError::internal(
                "Couldn't find video",
                AppError::NotFound(format!("video {}", video_id)),
            )
            .into());
        }
        Err(e) => return Err(AppError::internal("Couldn't find video", e).into()),
    };

    if !video.is_owned_by(user_id) {
        return Err(
            AppError::Unauthorized("Not authorized to update this video".to_string()).into(),
        );
    }

    tracing::info!(%video_id, %user_id, "Uploading video");

    let mut multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Multipart extraction rejected");
        AppError::InvalidInput("Unable to parse form file".to_string())
    })?;

    let (staged, size_bytes) = loop {
        let mut field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                return Err(AppError::InvalidInput("Unable to parse form file".to_string()).into());
            }
            Err(e) => {
                tracing::debug!(error = %e, "Failed to read multipart");
                return Err(AppError::InvalidInput("Unable to parse form file".to_string()).into());
            }
        };
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        check_video_content_type(field.content_type())?;
        break stage_upload(&mut field, &state.media.temp_dir).await?;
    };
    tracing::debug!(path = %staged.display(), size_bytes, "Video staged");

    let dimensions = state
        .media
        .inspector
        .inspect(&staged)
        .await
        .map_err(|e| AppError::internal("Couldn't get aspect ratio", e))?;
    let aspect_ratio = dimensions.aspect_ratio();

    let processed = match state.media.remuxer.remux_fast_start(&staged).await {
        Ok(path) => match TempPath::try_from_path(&path) {
            Ok(processed) => processed,
            Err(e) => {
                if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                    tracing::warn!(
                        error = %remove_err,
                        path = %path.display(),
                        "Failed to remove remux output"
                    );
                }
                return Err(AppError::internal("Couldn't process video", e).into());
            }
        },
        Err(e) => {
            tracing::error!(error = %e, %video_id, "Fast-start remux failed");
            return Err(AppError::internal("Couldn't process video", e).into());
        }
    };
    drop(staged);

    let file = tokio::fs::File::open(&processed)
        .await
        .map_err(|e| AppError::internal("Couldn't process video", e))?;
    let content_length = file
        .metadata()
        .await
        .map_err(|e| AppError::internal("Couldn't process video", e))?
        .len();

    let key = video_key(aspect_ratio.storage_prefix(), user_id, video_id);
    state
        .media
        .storage
        .upload_stream(&key, VIDEO_CONTENT_TYPE, Some(content_length), Box::pin(file))
        .await
        .map_err(|e| AppError::internal("Error uploading file to S3", e))?;

    tracing::info!(
        %video_id,
        key = %key,
        aspect_ratio = aspect_ratio.as_str(),
        width = dimensions.width,
        height = dimensions.height,
        content_length,
        duration_ms = start.elapsed().as_millis() as u64,
        "Video uploaded"
    );

    video.video_url = Some(format!("http://{}/{}", state.media.cf_distribution, key));
    state
        .db
        .videos
        .update_video(&video)
        .await
        .map_err(|e| AppError::internal("Couldn't update video", e))?;

    Ok(StatusCode::OK)
}
