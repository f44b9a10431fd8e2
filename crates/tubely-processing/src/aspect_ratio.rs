//! Orientation buckets for uploaded videos.

use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Width and height of the first stream reported by the inspector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VideoDimensions {
    pub width: u32,
    pub height: u32,
}

impl VideoDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        AspectRatio::classify(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AspectRatio {
    /// Roughly 16:9
    Landscape,
    /// Roughly 9:16
    Portrait,
    Other,
}

impl AspectRatio {
    /// Bucket `width / height` into landscape (1.75, 1.80), portrait (0.53, 0.58) or other.
    ///
    /// Bounds are exclusive. A zero height is `Other`.
    pub fn classify(width: u32, height: u32) -> Self {
        if height == 0 {
            return AspectRatio::Other;
        }

        let ratio = f64::from(width) / f64::from(height);
        if ratio > 1.75 && ratio < 1.80 {
            AspectRatio::Landscape
        } else if ratio > 0.53 && ratio < 0.58 {
            AspectRatio::Portrait
        } else {
            AspectRatio::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Other => "other",
        }
    }

    /// Object-key directory for this orientation, trailing slash included.
    pub fn storage_prefix(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "landscape/",
            AspectRatio::Portrait => "portrait/",
            AspectRatio::Other => "other/",
        }
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
