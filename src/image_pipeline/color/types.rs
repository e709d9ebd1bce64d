//! Color value types

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance to another color in RGB space.
    pub fn distance_squared(&self, r: u8, g: u8, b: u8) -> u32 {
        let dr = i32::from(self.r) - i32::from(r);
        let dg = i32::from(self.g) - i32::from(g);
        let db = i32::from(self.b) - i32::from(b);
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Exact-match lookup table for named colors (keys are lower-case).
pub(crate) const NAMED_COLORS: &[(&str, RgbColor)] = &[
    ("white", RgbColor::new(255, 255, 255)),
    ("black", RgbColor::new(0, 0, 0)),
    ("red", RgbColor::new(255, 0, 0)),
    ("green", RgbColor::new(0, 255, 0)),
    ("blue", RgbColor::new(0, 0, 255)),
    ("yellow", RgbColor::new(255, 255, 0)),
    ("cyan", RgbColor::new(0, 255, 255)),
    ("magenta", RgbColor::new(255, 0, 255)),
    ("gray", RgbColor::new(128, 128, 128)),
    ("grey", RgbColor::new(128, 128, 128)),
];
