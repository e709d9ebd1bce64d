use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::types::PixelBuffer;

/// Decode/encode capability the editing pipelines are built on.
///
/// Crops are encoded concurrently, so implementations must be shareable across threads.
pub trait RasterCodec: Send + Sync {
    fn decode(&self, data: &[u8]) -> Result<PixelBuffer>;
    fn encode(&self, raster: &PixelBuffer) -> Result<Vec<u8>>;
}
