use crate::image_pipeline::common::error::{EditError, Result};
use crate::image_pipeline::raster::PixelBuffer;
use crate::image_pipeline::regions::types::{BoundsViolation, Rectangle};

/// A region that passed bounds validation, in unsigned pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWindow {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Checks one rectangle against an image of `width` x `height`.
///
/// Rules run in a fixed order and the first failure wins: negative position,
/// non-positive size, right edge past `width`, bottom edge past `height`.
pub fn check_bounds(
    rect: &Rectangle,
    width: u32,
    height: u32,
) -> std::result::Result<PixelWindow, BoundsViolation> {
    let (x, y) = (rect.position.x, rect.position.y);
    let (w, h) = (rect.size.w, rect.size.h);

    if x < 0 || y < 0 {
        return Err(BoundsViolation::NegativePosition);
    }
    if w <= 0 || h <= 0 {
        return Err(BoundsViolation::NonPositiveSize);
    }
    if x.saturating_add(w) > i64::from(width) {
        return Err(BoundsViolation::ExceedsWidth);
    }
    if y.saturating_add(h) > i64::from(height) {
        return Err(BoundsViolation::ExceedsHeight);
    }

    // all four values are now within 0..=width/height
    Ok(PixelWindow {
        x: x as u32,
        y: y as u32,
        w: w as u32,
        h: h as u32,
    })
}

/// Validates every region before any is used, reporting the first failure in input order.
pub fn validate_regions(regions: &[Rectangle], width: u32, height: u32) -> Result<Vec<PixelWindow>> {
    regions
        .iter()
        .enumerate()
        .map(|(index, rect)| {
            check_bounds(rect, width, height)
                .map_err(|violation| EditError::OutOfBoundsRegion { index, violation })
        })
        .collect()
}

/// Sets alpha to 0 for every pixel covered by any region, in input order.
///
/// Windows are clipped to the raster, so unvalidated input cannot index out of
/// bounds. Overlaps need no special handling.
pub fn mask_regions(raster: &mut PixelBuffer, regions: &[Rectangle]) -> usize {
    let width = i64::from(raster.width());
    let height = i64::from(raster.height());
    let mut masked = 0;

    for rect in regions {
        let x0 = rect.position.x.clamp(0, width);
        let y0 = rect.position.y.clamp(0, height);
        let x1 = rect.position.x.saturating_add(rect.size.w).clamp(0, width);
        let y1 = rect.position.y.saturating_add(rect.size.h).clamp(0, height);

        for y in y0..y1 {
            for x in x0..x1 {
                if raster.set_alpha(x as u32, y as u32, 0) {
                    masked += 1;
                }
            }
        }
    }

    masked
}
