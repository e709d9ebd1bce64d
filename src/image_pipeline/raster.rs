//! Raster decoding/encoding module
//!
//! This module provides codec-agnostic access to flat RGBA pixel buffers.

mod codec;
mod png_codec;
pub mod types;

pub use codec::RasterCodec;
pub use png_codec::PngCodec;
pub use types::PixelBuffer;
