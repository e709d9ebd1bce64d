//! Editing configuration types

use crate::image_pipeline::common::error::{EditError, Result};

/// Environment variable holding the tolerance used when a caller gives none.
pub const ENV_DEFAULT_TOLERANCE: &str = "KEYCROP_DEFAULT_TOLERANCE";
/// Environment variable holding the largest accepted width or height (`0` or `none` disables it).
pub const ENV_MAX_DIMENSION: &str = "KEYCROP_MAX_DIMENSION";
/// Environment variable toggling concurrent crop extraction.
pub const ENV_PARALLEL_CROPS: &str = "KEYCROP_PARALLEL_CROPS";

const DEFAULT_MAX_DIMENSION: u32 = 16384;

/// Configuration shared by the background removal and cropping pipelines
#[derive(Debug, Clone)]
pub struct EditConfig {
    /// Tolerance applied when a removal request does not carry its own
    pub default_tolerance: u8,
    /// Whether to reject empty or oversized images right after decoding
    pub validate_dimensions: bool,
    /// Largest accepted width or height, in pixels
    pub max_dimension: Option<u32>,
    /// Whether crops are extracted on the rayon pool
    pub parallel_crops: bool,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            default_tolerance: 0,
            validate_dimensions: true,
            max_dimension: Some(DEFAULT_MAX_DIMENSION),
            parallel_crops: true,
        }
    }
}

impl EditConfig {
    pub fn builder() -> EditConfigBuilder {
        EditConfigBuilder::default()
    }

    /// Builds a config from the defaults, overridden by any `KEYCROP_*` variables that are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(raw) = lookup(ENV_DEFAULT_TOLERANCE) {
            let tolerance = raw.trim().parse::<u8>().map_err(|_| {
                EditError::InvalidConfig(format!(
                    "{ENV_DEFAULT_TOLERANCE} must be an integer between 0 and 255, got '{raw}'"
                ))
            })?;
            builder = builder.default_tolerance(tolerance);
        }

        if let Some(raw) = lookup(ENV_MAX_DIMENSION) {
            let value = raw.trim();
            let max = if value.eq_ignore_ascii_case("none") || value == "0" {
                None
            } else {
                Some(value.parse::<u32>().map_err(|_| {
                    EditError::InvalidConfig(format!(
                        "{ENV_MAX_DIMENSION} must be a positive integer or 'none', got '{raw}'"
                    ))
                })?)
            };
            builder = builder.max_dimension(max);
        }

        if let Some(raw) = lookup(ENV_PARALLEL_CROPS) {
            let parallel = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(EditError::InvalidConfig(format!(
                        "{ENV_PARALLEL_CROPS} must be a boolean, got '{raw}'"
                    )));
                }
            };
            builder = builder.parallel_crops(parallel);
        }

        Ok(builder.build())
    }

    /// Checks decoded dimensions against the configured limits.
    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if !self.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(EditError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.max_dimension {
            if width > max || height > max {
                tracing::warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(EditError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }
}

/// Builder for EditConfig
#[derive(Default)]
pub struct EditConfigBuilder {
    default_tolerance: Option<u8>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
    parallel_crops: Option<bool>,
}

impl EditConfigBuilder {
    pub fn default_tolerance(mut self, tolerance: u8) -> Self {
        self.default_tolerance = Some(tolerance);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn parallel_crops(mut self, enable: bool) -> Self {
        self.parallel_crops = Some(enable);
        self
    }

    pub fn build(self) -> EditConfig {
        let default = EditConfig::default();
        EditConfig {
            default_tolerance: self.default_tolerance.unwrap_or(default.default_tolerance),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            parallel_crops: self.parallel_crops.unwrap_or(default.parallel_crops),
        }
    }
}
