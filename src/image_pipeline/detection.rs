//! Detection box conversion module
//!
//! Turns boxes reported on a normalized 0-1000 grid into absolute-pixel
//! rectangles labeled with the requested object they most likely refer to.

mod transform;
pub mod types;

pub use transform::{
    NORMALIZED_SCALE, box_to_rectangle, find_matching_object, resolve_object_name,
    transform_boxes,
};
pub use types::{DetectedBox, ImageSize, RequestedObject};
