//! Database repositories for the data access layer

mod video;

pub use video::{VideoRepository, VideoRow};
