//! Geometric filters applied to detector output before merging.
//!
//! Both filters are pure batch transforms: they never reorder surviving
//! boxes and carry no state between passes.

use crate::config::IconFilterConfig;
use crate::error::Result;
use crate::geometry::BoundingBox;

/// Drop components that are mostly covered by a text region.
///
/// A component whose area is covered by any single text box at a ratio at
/// or above `threshold` is considered text rather than a distinct graphical
/// element. The first text box over the threshold settles it. Surviving
/// components keep their original order.
///
/// Malformed boxes on either side fail the whole pass; callers treat that
/// as fatal for the frame.
pub fn filter_overlapping(
    components: Vec<BoundingBox>,
    text_boxes: &[BoundingBox],
    threshold: f64,
) -> Result<Vec<BoundingBox>> {
    for bbox in components.iter().chain(text_boxes.iter()) {
        bbox.validate()?;
    }

    if text_boxes.is_empty() {
        return Ok(components);
    }

    let survivors = components
        .into_iter()
        .filter(|component| {
            !text_boxes
                .iter()
                .any(|text| component.overlap_ratio(text) >= threshold)
        })
        .collect();

    Ok(survivors)
}

/// Keep only small, roughly square components (the icon/button heuristic).
///
/// A component survives iff its width and height both fall within
/// `[min_size, max_size]` and `max(w,h)/min(w,h)` does not exceed
/// `max_aspect_ratio`. Degenerate boxes are excluded unconditionally.
pub fn filter_by_size_and_aspect(
    components: Vec<BoundingBox>,
    filter: &IconFilterConfig,
) -> Result<Vec<BoundingBox>> {
    for bbox in &components {
        bbox.validate()?;
    }

    let survivors = components
        .into_iter()
        .filter(|component| {
            let width = component.width();
            let height = component.height();

            if width == 0 || height == 0 {
                return false;
            }

            let size_ok = (filter.min_size..=filter.max_size).contains(&width)
                && (filter.min_size..=filter.max_size).contains(&height);

            let aspect = width.max(height) as f64 / width.min(height) as f64;

            size_ok && aspect <= filter.max_aspect_ratio
        })
        .collect();

    Ok(survivors)
}
