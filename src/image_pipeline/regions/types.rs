//! Region and crop result types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-left corner of a region, in absolute pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

/// Extent of a region, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub w: i64,
    pub h: i64,
}

/// Axis-aligned rectangle, optionally tagged with the object it frames.
///
/// Coordinates are signed so that malformed requests survive deserialization
/// and are rejected by bounds validation with a precise reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    pub position: Position,
    pub size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
}

impl Rectangle {
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self {
            position: Position { x, y },
            size: Size { w, h },
            object: None,
        }
    }

    pub fn labeled(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }
}

/// The rule a region broke, in the order rules are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsViolation {
    NegativePosition,
    NonPositiveSize,
    ExceedsWidth,
    ExceedsHeight,
}

impl fmt::Display for BoundsViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BoundsViolation::NegativePosition => "negative position",
            BoundsViolation::NonPositiveSize => "non-positive size",
            BoundsViolation::ExceedsWidth => "right edge exceeds image width",
            BoundsViolation::ExceedsHeight => "bottom edge exceeds image height",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Metadata entry for one crop; `index` matches the request order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CroppedRegion {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    pub position: Position,
    pub size: Size,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropMetadata {
    pub original_dimensions: Dimensions,
    pub cropped_regions: Vec<CroppedRegion>,
}

/// Output of a crop call.
///
/// `cropped_images[i]` and `metadata.cropped_regions[i]` always describe the
/// same requested region.
#[derive(Debug, Clone)]
pub struct CropResult {
    pub cropped_images: Vec<Vec<u8>>,
    pub background_image: Option<Vec<u8>>,
    pub metadata: CropMetadata,
}
