use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{EditError, Result};
use crate::image_pipeline::detection::types::{DetectedBox, ImageSize, RequestedObject};
use crate::image_pipeline::regions::{Rectangle, check_bounds};

/// Side length of the normalized grid detection boxes are reported on.
pub const NORMALIZED_SCALE: f64 = 1000.0;

/// Finds the requested object a detector label refers to.
///
/// Priority: case-insensitive exact name match, then case-insensitive
/// substring containment in either direction. Ties go to the earliest
/// requested object.
pub fn find_matching_object<'a>(
    label: &str,
    requested: &'a [RequestedObject],
) -> Option<&'a RequestedObject> {
    let label = label.to_lowercase();

    requested
        .iter()
        .find(|object| object.name.to_lowercase() == label)
        .or_else(|| {
            requested.iter().find(|object| {
                let name = object.name.to_lowercase();
                label.contains(&name) || name.contains(&label)
            })
        })
}

/// The requested name matching `label`, or `label` itself when nothing matches.
pub fn resolve_object_name(label: &str, requested: &[RequestedObject]) -> String {
    match find_matching_object(label, requested) {
        Some(object) => object.name.clone(),
        None => {
            debug!("No requested object matches '{}', keeping detector label", label);
            label.to_string()
        }
    }
}

fn scale(normalized: i64, extent: u32) -> i64 {
    // f64::round rounds half away from zero
    (normalized as f64 / NORMALIZED_SCALE * f64::from(extent)).round() as i64
}

/// Converts one normalized box to absolute pixels. No clamping is applied.
///
/// Coordinates far outside the normalized grid saturate instead of wrapping,
/// so they still fail the bounds check in [`transform_boxes`].
pub fn box_to_rectangle(detected: &DetectedBox, image: ImageSize) -> Rectangle {
    let [y_min, x_min, y_max, x_max] = detected.box_2d;
    Rectangle::new(
        scale(x_min, image.width),
        scale(y_min, image.height),
        scale(x_max.saturating_sub(x_min), image.width),
        scale(y_max.saturating_sub(y_min), image.height),
    )
}

/// Converts detector output into labeled rectangles, in input order.
///
/// Fails on the first box whose pixel rectangle does not fit the image.
#[instrument(skip(boxes, requested), fields(box_count = boxes.len()))]
pub fn transform_boxes(
    boxes: &[DetectedBox],
    requested: &[RequestedObject],
    image: ImageSize,
) -> Result<Vec<Rectangle>> {
    boxes
        .iter()
        .enumerate()
        .map(|(index, detected)| {
            let mut rect = box_to_rectangle(detected, image);
            check_bounds(&rect, image.width, image.height)
                .map_err(|violation| EditError::OutOfBoundsBox { index, violation })?;

            rect.object = Some(resolve_object_name(&detected.label, requested));
            debug!(
                index,
                label = %detected.label,
                x = rect.position.x,
                y = rect.position.y,
                w = rect.size.w,
                h = rect.size.h,
                "Transformed detection box"
            );
            Ok(rect)
        })
        .collect()
}
