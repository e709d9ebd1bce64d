use std::io::Cursor;
use std::sync::{Arc, Mutex};

use image::{GenericImageView, ImageFormat, Rgb, RgbImage};

use crate::image_pipeline::background::{BackgroundRemover, ColorMatcher};
use crate::image_pipeline::color::RgbColor;
use crate::image_pipeline::common::error::{EditError, Result};
use crate::image_pipeline::config::EditConfig;
use crate::image_pipeline::raster::{PixelBuffer, PngCodec, RasterCodec};

struct MockCodec {
    should_fail_encode: bool,
    decoded: PixelBuffer,
    encoded: Arc<Mutex<Vec<PixelBuffer>>>,
}

impl MockCodec {
    fn returning(decoded: PixelBuffer) -> Self {
        Self {
            should_fail_encode: false,
            decoded,
            encoded: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl RasterCodec for MockCodec {
    fn decode(&self, _data: &[u8]) -> Result<PixelBuffer> {
        Ok(self.decoded.clone())
    }

    fn encode(&self, raster: &PixelBuffer) -> Result<Vec<u8>> {
        if self.should_fail_encode {
            return Err(EditError::EncodeError("Mock encode error".to_string()));
        }
        self.encoded.lock().unwrap().push(raster.clone());
        Ok(b"mock png".to_vec())
    }
}

fn png_of(raster: &PixelBuffer) -> Vec<u8> {
    PngCodec.encode(raster).unwrap()
}

fn single_pixel(rgba: [u8; 4]) -> Vec<u8> {
    png_of(&PixelBuffer::filled(1, 1, rgba))
}

fn alpha_after(input: &[u8], target: RgbColor, tolerance: u8) -> u8 {
    let remover = BackgroundRemover::new(EditConfig::default());
    let output = remover.remove_background(input, target, tolerance).unwrap();
    PngCodec.decode(&output).unwrap().pixel(0, 0).unwrap()[3]
}

#[test]
fn test_exact_match_single_pixel_is_removed() {
    let target = RgbColor::new(0, 255, 0);
    assert_eq!(alpha_after(&single_pixel([0, 255, 0, 255]), target, 0), 0);
}

#[test]
fn test_off_by_one_in_any_channel_is_kept() {
    let target = RgbColor::new(100, 100, 100);
    for rgba in [[101, 100, 100, 255], [100, 99, 100, 255], [100, 100, 101, 255]] {
        assert_eq!(alpha_after(&single_pixel(rgba), target, 0), 255, "{rgba:?}");
    }
}

#[test]
fn test_tolerance_boundary_is_inclusive() {
    let black = RgbColor::new(0, 0, 0);
    // distance exactly 5
    assert_eq!(alpha_after(&single_pixel([3, 4, 0, 255]), black, 5), 0);
    assert_eq!(alpha_after(&single_pixel([0, 0, 5, 255]), black, 5), 0);
    // just past 5
    assert_eq!(alpha_after(&single_pixel([3, 4, 1, 255]), black, 5), 255);
    assert_eq!(alpha_after(&single_pixel([0, 0, 6, 255]), black, 5), 255);
}

#[test]
fn test_matcher_selects_exact_path_for_zero_tolerance() {
    let target = RgbColor::new(1, 2, 3);
    assert_eq!(ColorMatcher::new(target, 0), ColorMatcher::Exact(target));
    assert!(matches!(ColorMatcher::new(target, 1), ColorMatcher::Within { .. }));
    assert!(ColorMatcher::new(target, 1).matches(1, 2, 4));
    assert!(!ColorMatcher::new(target, 0).matches(1, 2, 4));
}

#[test]
fn test_unmatched_pixels_keep_their_alpha() {
    let mut raster = PixelBuffer::filled(2, 1, [255, 255, 255, 255]);
    raster.as_bytes_mut()[4..8].copy_from_slice(&[10, 10, 10, 77]);

    let remover = BackgroundRemover::new(EditConfig::default());
    let output = remover
        .remove_background(&png_of(&raster), RgbColor::new(255, 255, 255), 0)
        .unwrap();
    let result = PngCodec.decode(&output).unwrap();

    assert_eq!(result.pixel(0, 0), Some([255, 255, 255, 0]));
    assert_eq!(result.pixel(1, 0), Some([10, 10, 10, 77]));
}

#[test]
fn test_output_has_alpha_and_same_dimensions() {
    let img = RgbImage::from_pixel(7, 5, Rgb([255, 255, 255]));
    let mut source = Vec::new();
    img.write_to(&mut Cursor::new(&mut source), ImageFormat::Png).unwrap();

    let remover = BackgroundRemover::new(EditConfig::default());
    let output = remover
        .remove_background(&source, RgbColor::new(0, 0, 0), 0)
        .unwrap();

    let decoded = image::load_from_memory(&output).unwrap();
    assert!(decoded.color().has_alpha());
    assert_eq!(decoded.dimensions(), (7, 5));
}

#[test]
fn test_stats_count_removed_pixels() {
    let mut raster = PixelBuffer::filled(4, 1, [0, 0, 255, 255]);
    raster.as_bytes_mut()[0..4].copy_from_slice(&[255, 0, 0, 255]);

    let remover = BackgroundRemover::with_custom(
        MockCodec::returning(raster),
        EditConfig::default(),
    );
    let (_, stats) = remover
        .remove_background_with_stats(b"ignored", RgbColor::new(0, 0, 255), 0)
        .unwrap();

    assert_eq!(stats.total_pixels, 4);
    assert_eq!(stats.removed_pixels, 3);
    assert!((stats.percentage() - 75.0).abs() < f64::EPSILON);
}

#[test]
fn test_mutated_buffer_reaches_encoder() {
    let codec = MockCodec::returning(PixelBuffer::filled(2, 2, [9, 9, 9, 255]));
    let encoded = codec.encoded.clone();
    let remover = BackgroundRemover::with_custom(codec, EditConfig::default());

    remover
        .remove_background(b"ignored", RgbColor::new(9, 9, 9), 0)
        .unwrap();

    let encoded = encoded.lock().unwrap();
    assert_eq!(encoded.len(), 1);
    assert!(encoded[0].as_bytes().chunks_exact(4).all(|px| px[3] == 0));
}

#[test]
fn test_undecodable_input() {
    let remover = BackgroundRemover::new(EditConfig::default());
    let result = remover.remove_background(b"not an image", RgbColor::new(0, 0, 0), 0);
    assert!(matches!(result, Err(EditError::DecodeError(_))));
}

#[test]
fn test_encoder_failure() {
    let mut codec = MockCodec::returning(PixelBuffer::filled(1, 1, [0, 0, 0, 255]));
    codec.should_fail_encode = true;
    let remover = BackgroundRemover::with_custom(codec, EditConfig::default());

    let result = remover.remove_background(b"ignored", RgbColor::new(0, 0, 0), 0);
    assert!(matches!(result, Err(EditError::EncodeError(_))));
}

#[test]
fn test_dimension_validation_failure() {
    let codec = MockCodec::returning(PixelBuffer::filled(20, 10, [0, 0, 0, 255]));
    let encoded = codec.encoded.clone();
    let config = EditConfig::builder().max_dimension(Some(16)).build();
    let remover = BackgroundRemover::with_custom(codec, config);

    let result = remover.remove_background(b"ignored", RgbColor::new(0, 0, 0), 0);

    assert!(matches!(result, Err(EditError::InvalidDimensions(20, 10))));
    assert!(encoded.lock().unwrap().is_empty());
}
