//! Color-keyed background removal module
//!
//! Makes every pixel that matches a target color (exactly, or within a
//! Euclidean RGB tolerance) fully transparent and re-encodes the result as PNG.

mod matcher;
mod remover;

#[cfg(test)]
mod tests;

pub use matcher::{ColorMatcher, RemovalStats, apply_color_key};
pub use remover::BackgroundRemover;
