//! Color expression module
//!
//! Parses named colors, hex notation and `rgb()`/`rgba()` functions into a
//! canonical RGB triple.

pub mod types;
mod parser;

pub use types::RgbColor;
pub use parser::{parse_color, is_valid_color};
