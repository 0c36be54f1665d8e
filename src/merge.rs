//! Final merge of filtered components and text regions into one labeled
//! element list.

use crate::geometry::BoundingBox;
use crate::models::{DetectedElement, ElementClass, TextDetection};
use std::collections::HashMap;

/// Combine components and text regions into the final element list.
///
/// Components come first, in detector order, each picking up its
/// classifier label from `classified` when one exists; text regions follow
/// in OCR order with their transcripts as labels. A stable concatenation —
/// no spatial sorting and no positional deduplication happen here; text
/// overlap removal is [`crate::filter::filter_overlapping`]'s job upstream.
pub fn merge_and_label(
    components: Vec<DetectedElement>,
    classified: &HashMap<BoundingBox, ElementClass>,
    texts: &[TextDetection],
) -> Vec<DetectedElement> {
    let mut merged = Vec::with_capacity(components.len() + texts.len());

    for mut element in components {
        if element.label.is_none() {
            if let Some(class) = classified.get(&element.bbox) {
                element.label = Some(class.as_str().to_string());
            }
        }
        merged.push(element);
    }

    for text in texts {
        merged.push(DetectedElement::text(
            text.bbox,
            text.text.clone(),
            text.confidence,
        ));
    }

    merged
}
