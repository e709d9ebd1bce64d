//! Decoded raster types

use crate::image_pipeline::common::error::{EditError, Result};

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Index of the alpha byte within a pixel.
pub const ALPHA: usize = 3;

/// Decoded image as interleaved RGBA bytes, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
    /// Whether the source encoding carried an alpha channel (opacity is synthesized otherwise)
    source_has_alpha: bool,
}

impl PixelBuffer {
    /// Wraps RGBA bytes, rejecting buffers whose length does not match the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(EditError::DecodeError(format!(
                "RGBA buffer holds {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            )));
        }

        Ok(Self {
            width,
            height,
            data,
            source_has_alpha: true,
        })
    }

    /// A fully opaque buffer filled with one color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixel_count = width as usize * height as usize;
        let data = rgba.iter().copied().cycle().take(pixel_count * CHANNELS).collect();
        Self {
            width,
            height,
            data,
            source_has_alpha: true,
        }
    }

    pub fn with_source_alpha(mut self, has_alpha: bool) -> Self {
        self.source_has_alpha = has_alpha;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn source_has_alpha(&self) -> bool {
        self.source_has_alpha
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`, or `None` outside the raster.
    pub fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let offset = self.offset(x, y)?;
        let px = &self.data[offset..offset + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Sets the alpha of pixel `(x, y)`. Returns `false` when the pixel is outside the raster.
    pub fn set_alpha(&mut self, x: u32, y: u32, alpha: u8) -> bool {
        match self.offset(x, y) {
            Some(offset) => {
                self.data[offset + ALPHA] = alpha;
                true
            }
            None => false,
        }
    }

    /// Copies the window `[x, x + w) x [y, y + h)` into a new buffer.
    ///
    /// Returns `None` when the window does not lie inside the raster.
    pub fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> Option<PixelBuffer> {
        let right = x.checked_add(w)?;
        let bottom = y.checked_add(h)?;
        if right > self.width || bottom > self.height {
            return None;
        }

        let stride = self.width as usize * CHANNELS;
        let row_len = w as usize * CHANNELS;
        let mut data = Vec::with_capacity(row_len * h as usize);

        for row in y as usize..bottom as usize {
            let start = row * stride + x as usize * CHANNELS;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }

        Some(PixelBuffer {
            width: w,
            height: h,
            data,
            source_has_alpha: self.source_has_alpha,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        PixelBuffer::new(width, height, data).unwrap()
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let result = PixelBuffer::new(2, 2, vec![0; 15]);
        assert!(matches!(result, Err(EditError::DecodeError(_))));
    }

    #[test]
    fn test_pixel_access_is_bounds_checked() {
        let raster = gradient(3, 2);
        assert_eq!(raster.pixel(2, 1), Some([2, 1, 0, 255]));
        assert_eq!(raster.pixel(3, 0), None);
        assert_eq!(raster.pixel(0, 2), None);
    }

    #[test]
    fn test_set_alpha() {
        let mut raster = gradient(2, 2);
        assert!(raster.set_alpha(1, 1, 0));
        assert!(!raster.set_alpha(2, 0, 0));
        assert_eq!(raster.pixel(1, 1), Some([1, 1, 0, 0]));
        assert_eq!(raster.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_crop_copies_window() {
        let raster = gradient(5, 4);
        let window = raster.crop(1, 2, 3, 2).unwrap();
        assert_eq!(window.width(), 3);
        assert_eq!(window.height(), 2);
        assert_eq!(window.pixel(0, 0), Some([1, 2, 0, 255]));
        assert_eq!(window.pixel(2, 1), Some([3, 3, 0, 255]));
        assert_eq!(window.as_bytes().len(), 3 * 2 * CHANNELS);
    }

    #[test]
    fn test_crop_outside_raster_is_none() {
        let raster = gradient(5, 4);
        assert!(raster.crop(4, 0, 2, 1).is_none());
        assert!(raster.crop(0, 3, 1, 2).is_none());
        assert!(raster.crop(u32::MAX, 0, 2, 1).is_none());
        assert!(raster.crop(0, 1, 1, u32::MAX).is_none());
        assert!(raster.crop(0, 0, 5, 4).is_some());
    }

    #[test]
    fn test_filled() {
        let raster = PixelBuffer::filled(3, 3, [9, 8, 7, 255]);
        assert_eq!(raster.pixel_count(), 9);
        assert!(raster.as_bytes().chunks_exact(CHANNELS).all(|px| px == [9, 8, 7, 255]));
    }
}
