//! Narrow interfaces around the external detection systems.
//!
//! Component detection, OCR and classification are supplied by pre-trained
//! models and native libraries with no in-crate equivalent; everything
//! behind these traits is treated as an opaque collaborator.

pub mod command;
pub mod json_file;

use crate::error::Result;
use crate::geometry::BoundingBox;
use crate::models::{ElementClass, TextDetection};
use image::RgbaImage;

/// Produces candidate UI component boxes for a frame.
pub trait ComponentDetector {
    fn detect(&self, frame: &RgbaImage) -> Result<Vec<BoundingBox>>;
}

/// Produces text regions with recognized transcripts for a frame.
pub trait TextRecognizer {
    fn recognize(&self, frame: &RgbaImage) -> Result<Vec<TextDetection>>;
}

/// Maps one component crop (already resized to the classifier's fixed
/// square input size) to a class from the fixed label set.
pub trait ElementClassifier {
    fn classify(&self, crop: &RgbaImage) -> Result<ElementClass>;
}
