use thiserror::Error;

use crate::image_pipeline::regions::BoundsViolation;

#[derive(Error, Debug)]
pub enum EditError {
    #[error("Invalid color format: {0}")]
    InvalidColorFormat(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode PNG image: {0}")]
    EncodeError(String),

    #[error("Region {index} is out of bounds: {violation}")]
    OutOfBoundsRegion {
        index: usize,
        violation: BoundsViolation,
    },

    #[error("Detected box {index} is out of bounds: {violation}")]
    OutOfBoundsBox {
        index: usize,
        violation: BoundsViolation,
    },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EditError>;
