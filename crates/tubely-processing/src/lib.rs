//! Tubely media processing
//!
//! Thin wrappers around the external `ffprobe` and `ffmpeg` tools. Handlers depend on
//! the [`MediaInspector`] and [`Remuxer`] traits so tests can substitute fakes.

pub mod aspect_ratio;
mod command;
pub mod error;
pub mod probe;
pub mod remux;

pub use aspect_ratio::{AspectRatio, VideoDimensions};
pub use error::ProcessingError;
pub use probe::{parse_probe_output, FfprobeInspector, MediaInspector};
pub use remux::{fast_start_output_path, FfmpegRemuxer, Remuxer};
