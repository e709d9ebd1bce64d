use crate::image_pipeline::color::RgbColor;
use crate::image_pipeline::raster::PixelBuffer;
use crate::image_pipeline::raster::types::{ALPHA, CHANNELS};

/// Per-pixel match decision for color keying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMatcher {
    /// All three channels equal the target
    Exact(RgbColor),
    /// Euclidean RGB distance to the target is at most `tolerance` (inclusive)
    Within { target: RgbColor, tolerance: u8 },
}

impl ColorMatcher {
    pub fn new(target: RgbColor, tolerance: u8) -> Self {
        if tolerance == 0 {
            ColorMatcher::Exact(target)
        } else {
            ColorMatcher::Within { target, tolerance }
        }
    }

    #[inline]
    pub fn matches(&self, r: u8, g: u8, b: u8) -> bool {
        match *self {
            ColorMatcher::Exact(target) => target.r == r && target.g == g && target.b == b,
            // sqrt(d) <= t  <=>  d <= t^2, kept in integers to stay exact at the boundary
            ColorMatcher::Within { target, tolerance } => {
                let limit = u32::from(tolerance) * u32::from(tolerance);
                target.distance_squared(r, g, b) <= limit
            }
        }
    }
}

/// Diagnostic counts from one removal pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovalStats {
    pub total_pixels: usize,
    pub removed_pixels: usize,
}

impl RemovalStats {
    pub fn percentage(&self) -> f64 {
        if self.total_pixels == 0 {
            return 0.0;
        }
        self.removed_pixels as f64 / self.total_pixels as f64 * 100.0
    }
}

/// Zeroes the alpha of every matching pixel in place. Non-matching pixels are left untouched.
pub fn apply_color_key(raster: &mut PixelBuffer, matcher: &ColorMatcher) -> RemovalStats {
    let total_pixels = raster.pixel_count();
    let mut removed_pixels = 0;

    for px in raster.as_bytes_mut().chunks_exact_mut(CHANNELS) {
        if matcher.matches(px[0], px[1], px[2]) {
            px[ALPHA] = 0;
            removed_pixels += 1;
        }
    }

    RemovalStats {
        total_pixels,
        removed_pixels,
    }
}
