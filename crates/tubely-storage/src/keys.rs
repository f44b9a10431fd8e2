//! Shared key handling for storage backends.

use crate::traits::{StorageError, StorageResult};
use uuid::Uuid;

/// Build the object key for an uploaded video.
///
/// `prefix` is the orientation directory including its trailing slash (`landscape/`).
pub fn video_key(prefix: &str, user_id: Uuid, video_id: Uuid) -> String {
    format!("{}{}/{}.mp4", prefix, user_id, video_id)
}

/// Reject keys that could escape the storage root.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() || storage_key.contains("..") || storage_key.starts_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid characters: {}",
            storage_key
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_key_layout() {
        let user_id = Uuid::parse_str("8f2b3c1e-0d4a-4b6e-9a7f-1c2d3e4f5a6b").unwrap();
        let video_id = Uuid::parse_str("0b1c2d3e-4f5a-4b6c-8d7e-9f0a1b2c3d4e").unwrap();
        assert_eq!(
            video_key("landscape/", user_id, video_id),
            "landscape/8f2b3c1e-0d4a-4b6e-9a7f-1c2d3e4f5a6b/0b1c2d3e-4f5a-4b6c-8d7e-9f0a1b2c3d4e.mp4"
        );
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("portrait/a/b.mp4").is_ok());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("/absolute.mp4").is_err());
        assert!(validate_key("").is_err());
    }
}
