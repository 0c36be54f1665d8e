//! Adapters for pre-computed detection output stored as JSON stage files.
//!
//! The upstream detector and OCR tooling write their results to JSON
//! between pipeline stages; these loaders consume those files directly for
//! offline merge runs.

use crate::error::{PipelineError, Result};
use crate::geometry::BoundingBox;
use crate::models::TextDetection;
use std::fs;
use std::path::Path;

/// Load component boxes from a detector stage file.
///
/// Expected shape: a JSON array of `{x_min, y_min, x_max, y_max}` objects.
/// Every box is validated; a malformed box fails the load.
pub fn load_component_boxes(path: &Path) -> Result<Vec<BoundingBox>> {
    let raw = fs::read_to_string(path)
        .map_err(|_| PipelineError::FileNotFound(path.display().to_string()))?;
    let boxes: Vec<BoundingBox> = serde_json::from_str(&raw)?;

    for bbox in &boxes {
        bbox.validate()?;
    }

    Ok(boxes)
}

/// Load text detections from an OCR stage file.
///
/// Expected shape: a JSON array of `{bbox, text, confidence?}` objects.
pub fn load_text_detections(path: &Path) -> Result<Vec<TextDetection>> {
    let raw = fs::read_to_string(path)
        .map_err(|_| PipelineError::FileNotFound(path.display().to_string()))?;
    let texts: Vec<TextDetection> = serde_json::from_str(&raw)?;

    for detection in &texts {
        detection.bbox.validate()?;
    }

    Ok(texts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_component_boxes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"x_min":0,"y_min":0,"x_max":10,"y_max":10}},
               {{"x_min":50,"y_min":50,"x_max":60,"y_max":60}}]"#
        )
        .unwrap();

        let boxes = load_component_boxes(file.path()).unwrap();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0], BoundingBox::new(0, 0, 10, 10).unwrap());
    }

    #[test]
    fn test_load_rejects_malformed_box() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"x_min":10,"y_min":0,"x_max":5,"y_max":10}}]"#).unwrap();

        assert!(matches!(
            load_component_boxes(file.path()),
            Err(PipelineError::InvalidBox(_))
        ));
    }

    #[test]
    fn test_load_text_detections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"bbox":{{"x_min":0,"y_min":0,"x_max":40,"y_max":12}},"text":"File","confidence":0.99}}]"#
        )
        .unwrap();

        let texts = load_text_detections(file.path()).unwrap();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].text, "File");
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let result = load_component_boxes(Path::new("/nonexistent/compo.json"));
        assert!(matches!(result, Err(PipelineError::FileNotFound(_))));
    }
}
