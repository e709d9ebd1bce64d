use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::image_pipeline::{
    common::error::{EditError, Result},
    config::EditConfig,
    raster::{PixelBuffer, PngCodec, RasterCodec},
    regions::types::{CropMetadata, CropResult, CroppedRegion, Dimensions, Rectangle},
    regions::validate::{PixelWindow, mask_regions, validate_regions},
};

pub struct RegionCropper<C: RasterCodec = PngCodec> {
    codec: C,
    config: EditConfig,
}

impl RegionCropper<PngCodec> {
    pub fn new(config: EditConfig) -> Self {
        Self {
            codec: PngCodec,
            config,
        }
    }
}

impl<C: RasterCodec> RegionCropper<C> {
    pub fn with_custom(codec: C, config: EditConfig) -> Self {
        Self { codec, config }
    }

    /// Crops every region out of `input_data`.
    ///
    /// All regions are validated before any pixel work; one bad region fails the
    /// whole call. Crops come back in request order. With `include_background`
    /// the full image is also returned with every region made transparent.
    #[instrument(skip(self, input_data, regions), fields(input_size = input_data.len(), region_count = regions.len()))]
    pub fn crop_regions(
        &self,
        input_data: &[u8],
        regions: &[Rectangle],
        include_background: bool,
    ) -> Result<CropResult> {
        info!("Starting region crop");

        let mut raster = {
            let _span = tracing::info_span!("decode").entered();
            self.codec.decode(input_data)?
        };
        let (width, height) = (raster.width(), raster.height());

        let windows = {
            let _span = tracing::info_span!("validate", width, height).entered();
            self.config.check_dimensions(width, height)?;
            validate_regions(regions, width, height)?
        };

        let cropped_images = {
            let _span = tracing::info_span!("extract_crops", parallel = self.config.parallel_crops).entered();
            self.extract_crops(&raster, &windows)?
        };

        let background_image = if include_background {
            let _span = tracing::info_span!("mask_background").entered();
            let masked = mask_regions(&mut raster, regions);
            debug!("Masked {} pixels", masked);
            Some(self.codec.encode(&raster)?)
        } else {
            None
        };

        let metadata = CropMetadata {
            original_dimensions: Dimensions { width, height },
            cropped_regions: regions
                .iter()
                .enumerate()
                .map(|(index, rect)| CroppedRegion {
                    index,
                    object: rect.object.clone(),
                    position: rect.position,
                    size: rect.size,
                })
                .collect(),
        };

        info!(
            width,
            height,
            crops = cropped_images.len(),
            background = background_image.is_some(),
            "Region crop complete"
        );

        Ok(CropResult {
            cropped_images,
            background_image,
            metadata,
        })
    }

    // Indexed collect writes each result into its own slot, so output order
    // matches `windows` regardless of which worker finishes first.
    fn extract_crops(&self, raster: &PixelBuffer, windows: &[PixelWindow]) -> Result<Vec<Vec<u8>>> {
        let crop_one = |window: &PixelWindow| -> Result<Vec<u8>> {
            let crop = raster
                .crop(window.x, window.y, window.w, window.h)
                .ok_or(EditError::InvalidDimensions(window.w, window.h))?;
            self.codec.encode(&crop)
        };

        if self.config.parallel_crops {
            windows.par_iter().map(crop_one).collect()
        } else {
            windows.iter().map(crop_one).collect()
        }
    }

    /// Writes `crop_<i>.png`, optionally `background.png`, and `metadata.json` into `output_dir`.
    #[instrument(skip(self, input_path, output_dir, regions))]
    pub fn crop_regions_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        regions: &[Rectangle],
        output_dir: Q,
        include_background: bool,
    ) -> Result<CropMetadata> {
        let input_path = input_path.as_ref();
        let output_dir = output_dir.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_dir.display(),
            "Cropping regions from file"
        );

        let input_data = std::fs::read(input_path).map_err(|e| {
            EditError::InputReadError(format!("{}: {}", input_path.display(), e))
        })?;

        let result = self.crop_regions(&input_data, regions, include_background)?;

        std::fs::create_dir_all(output_dir)?;
        let write = |name: &str, bytes: &[u8]| -> Result<()> {
            let path = output_dir.join(name);
            std::fs::write(&path, bytes).map_err(|e| {
                EditError::OutputWriteError(format!("{}: {}", path.display(), e))
            })
        };

        for (index, png) in result.cropped_images.iter().enumerate() {
            write(&format!("crop_{index}.png"), png)?;
        }
        if let Some(background) = &result.background_image {
            write("background.png", background)?;
        }

        let metadata_json = serde_json::to_vec_pretty(&result.metadata)
            .map_err(|e| EditError::OutputWriteError(format!("metadata.json: {}", e)))?;
        write("metadata.json", &metadata_json)?;

        Ok(result.metadata)
    }

    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EditConfig) {
        self.config = config;
    }
}
