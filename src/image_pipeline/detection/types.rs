//! Detection input types

use serde::{Deserialize, Serialize};

/// A box as reported by an external detector.
///
/// `box_2d` is `[y_min, x_min, y_max, x_max]` on a 0-1000 grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedBox {
    pub label: String,
    pub box_2d: [i64; 4],
}

impl DetectedBox {
    pub fn new(label: impl Into<String>, box_2d: [i64; 4]) -> Self {
        Self {
            label: label.into(),
            box_2d,
        }
    }
}

/// An object the caller asked the detector to find
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedObject {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl RequestedObject {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}
