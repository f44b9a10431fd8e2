//! Tubely Storage Library
//!
//! Storage abstraction for uploaded videos, with implementations for S3 (via
//! `object_store`) and the local filesystem.
//!
//! # Storage key format
//!
//! Video keys are `{orientation}/{user_id}/{video_id}.mp4`, where orientation is one of
//! `landscape`, `portrait` or `other`. Keys must not contain `..` or a leading `/`.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::video_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use tubely_core::StorageBackend;
