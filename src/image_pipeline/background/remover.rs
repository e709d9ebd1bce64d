use std::path::Path;

use tracing::{info, instrument};

use crate::image_pipeline::{
    background::matcher::{ColorMatcher, RemovalStats, apply_color_key},
    color::{RgbColor, parse_color},
    common::error::{EditError, Result},
    config::EditConfig,
    raster::{PngCodec, RasterCodec},
};

pub struct BackgroundRemover<C: RasterCodec = PngCodec> {
    codec: C,
    config: EditConfig,
}

impl BackgroundRemover<PngCodec> {
    pub fn new(config: EditConfig) -> Self {
        Self {
            codec: PngCodec,
            config,
        }
    }
}

impl<C: RasterCodec> BackgroundRemover<C> {
    pub fn with_custom(codec: C, config: EditConfig) -> Self {
        Self { codec, config }
    }

    /// Makes pixels matching `target` transparent and returns the result as PNG bytes.
    ///
    /// With `tolerance == 0` only exact RGB matches are removed; otherwise every
    /// pixel within Euclidean distance `tolerance` of the target is.
    pub fn remove_background(
        &self,
        input_data: &[u8],
        target: RgbColor,
        tolerance: u8,
    ) -> Result<Vec<u8>> {
        self.remove_background_with_stats(input_data, target, tolerance)
            .map(|(png, _)| png)
    }

    #[instrument(skip(self, input_data, target), fields(input_size = input_data.len(), target = %target))]
    pub fn remove_background_with_stats(
        &self,
        input_data: &[u8],
        target: RgbColor,
        tolerance: u8,
    ) -> Result<(Vec<u8>, RemovalStats)> {
        info!("Starting background removal");

        let mut raster = {
            let _span = tracing::info_span!("decode").entered();
            self.codec.decode(input_data)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = raster.width(),
                height = raster.height()
            ).entered();
            self.config.check_dimensions(raster.width(), raster.height())?;
        }

        let stats = {
            let _span = tracing::info_span!("color_key", tolerance).entered();
            apply_color_key(&mut raster, &ColorMatcher::new(target, tolerance))
        };

        let png = {
            let _span = tracing::info_span!("encode_png").entered();
            self.codec.encode(&raster)?
        };

        info!(
            width = raster.width(),
            height = raster.height(),
            removed = stats.removed_pixels,
            "Background removal complete: {:.2}% of pixels made transparent",
            stats.percentage()
        );
        Ok((png, stats))
    }

    /// File-to-file variant. `tolerance` falls back to the configured default when `None`.
    #[instrument(skip(self, input_path, output_path))]
    pub fn remove_background_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        color: &str,
        tolerance: Option<u8>,
    ) -> Result<RemovalStats> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        let target = parse_color(color)?;
        let tolerance = tolerance.unwrap_or(self.config.default_tolerance);

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Removing background from file"
        );

        let input_data = std::fs::read(input_path).map_err(|e| {
            EditError::InputReadError(format!("{}: {}", input_path.display(), e))
        })?;

        let (png, stats) = self.remove_background_with_stats(&input_data, target, tolerance)?;

        std::fs::write(output_path, png).map_err(|e| {
            EditError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;

        Ok(stats)
    }

    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EditConfig) {
        self.config = config;
    }
}
