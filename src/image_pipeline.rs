//! Image editing pipeline module
//!
//! This module provides color-keyed background removal and multi-region
//! cropping over decoded RGBA rasters, plus the helpers that feed them:
//! color expression parsing and detection-box conversion.

pub mod common;
pub mod config;
pub mod color;
pub mod raster;
pub mod background;
pub mod regions;
pub mod detection;

pub use common::{
    EditError,
    Result,
};

pub use config::{
    EditConfig,
    EditConfigBuilder,
};

pub use color::{
    RgbColor,
    parse_color,
    is_valid_color,
};

pub use raster::{
    PixelBuffer,
    RasterCodec,
    PngCodec,
};

pub use background::{
    BackgroundRemover,
    ColorMatcher,
    RemovalStats,
};

pub use regions::{
    BoundsViolation,
    CropMetadata,
    CropResult,
    CroppedRegion,
    Dimensions,
    Position,
    Rectangle,
    RegionCropper,
    Size,
};

pub use detection::{
    DetectedBox,
    ImageSize,
    RequestedObject,
    find_matching_object,
    transform_boxes,
};
