//! Multi-region cropping module
//!
//! Validates rectangular regions against the decoded image, extracts each one
//! as its own PNG and optionally emits the full image with every region
//! punched out.

mod cropper;
mod validate;
pub mod types;


pub use cropper::RegionCropper;
pub use types::{
    BoundsViolation, CropMetadata, CropResult, CroppedRegion, Dimensions, Position, Rectangle,
    Size,
};
pub use validate::{check_bounds, mask_regions, validate_regions, PixelWindow};
