use axum_test::multipart::{MultipartForm, Part};
use tubely_core::{CreateVideoParams, Video};
use tubely_db::VideoRepository;
use uuid::Uuid;

/// Insert a draft video owned by `owner`.
pub async fn create_video(videos: &VideoRepository, owner: Uuid) -> Video {
    videos
        .create_video(CreateVideoParams {
            title: "Boots on the ground".to_string(),
            description: "A test upload".to_string(),
            user_id: owner,
        })
        .await
        .expect("Failed to create test video")
}

/// 1x1 transparent PNG.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// Bytes standing in for an MP4 container; the fakes never parse them.
pub fn fake_mp4_bytes() -> Vec<u8> {
    let mut data = b"\x00\x00\x00\x18ftypmp42\x00\x00\x00\x00mp42isom".to_vec();
    data.extend(std::iter::repeat(0xAB).take(4096));
    data
}

pub fn file_form(field: &str, data: Vec<u8>, file_name: &str, mime_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        field,
        Part::bytes(bytes::Bytes::from(data))
            .file_name(file_name)
            .mime_type(mime_type),
    )
}

pub fn thumbnail_form(data: Vec<u8>, mime_type: &str) -> MultipartForm {
    file_form("thumbnail", data, "thumb", mime_type)
}

pub fn video_form(data: Vec<u8>, mime_type: &str) -> MultipartForm {
    file_form("video", data, "boots.mp4", mime_type)
}
