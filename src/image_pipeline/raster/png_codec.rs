//! Raster codec backed by the `image` crate.
//!
//! Decoding accepts every format enabled on the `image` dependency (PNG, JPEG,
//! WebP, BMP, GIF, TIFF) and always yields RGBA8, synthesizing full opacity for
//! sources without alpha. Encoding always produces RGBA8 PNG, the only widely
//! supported format with lossless alpha.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;

use crate::image_pipeline::common::error::{EditError, Result};
use crate::image_pipeline::raster::codec::RasterCodec;
use crate::image_pipeline::raster::types::PixelBuffer;

pub struct PngCodec;

impl RasterCodec for PngCodec {
    fn decode(&self, data: &[u8]) -> Result<PixelBuffer> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| EditError::DecodeError(e.to_string()))?;

        let source_has_alpha = decoded.color().has_alpha();
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        debug!(
            "Decoded image: {}x{} (source alpha: {})",
            width, height, source_has_alpha
        );

        Ok(PixelBuffer::new(width, height, rgba.into_raw())?.with_source_alpha(source_has_alpha))
    }

    fn encode(&self, raster: &PixelBuffer) -> Result<Vec<u8>> {
        debug!("Encoding PNG image: {}x{}", raster.width(), raster.height());

        let mut buffer = Vec::new();
        PngEncoder::new(&mut buffer)
            .write_image(
                raster.as_bytes(),
                raster.width(),
                raster.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| EditError::EncodeError(e.to_string()))?;

        debug!("PNG encoding complete, {} bytes", buffer.len());
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    #[test]
    fn test_rgb_source_gets_opaque_alpha() {
        let img = RgbImage::from_pixel(4, 3, Rgb([10, 20, 30]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();

        let raster = PngCodec.decode(&bytes).unwrap();
        assert_eq!((raster.width(), raster.height()), (4, 3));
        assert!(!raster.source_has_alpha());
        assert_eq!(raster.pixel(3, 2), Some([10, 20, 30, 255]));
    }

    #[test]
    fn test_encode_produces_rgba_png() {
        let raster = PixelBuffer::filled(5, 2, [1, 2, 3, 0]);
        let bytes = PngCodec.encode(&raster).unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(decoded.color().has_alpha());
        assert_eq!(decoded.dimensions(), (5, 2));

        let back = PngCodec.decode(&bytes).unwrap();
        assert_eq!(back.as_bytes(), raster.as_bytes());
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = PngCodec.decode(b"definitely not an image");
        assert!(matches!(result, Err(EditError::DecodeError(_))));
    }
}
