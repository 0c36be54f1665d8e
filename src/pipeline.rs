//! One analysis pass: collaborator calls, geometric filtering,
//! classification, merge.
//!
//! A pass is synchronous and owns its frame for the duration; nothing is
//! shared between passes and nothing is written until filtering completes.

use crate::config::PipelineConfig;
use crate::detect::{ComponentDetector, ElementClassifier, TextRecognizer};
use crate::error::Result;
use crate::filter::{filter_by_size_and_aspect, filter_overlapping};
use crate::geometry::BoundingBox;
use crate::merge::merge_and_label;
use crate::models::{DetectedElement, DetectionReport, ElementClass, TextDetection};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::collections::HashMap;
use std::time::Instant;

use crate::config::constants::CLASSIFIER_INPUT_SIZE;

/// Everything a completed pass produces.
#[derive(Debug)]
pub struct PassOutput {
    pub elements: Vec<DetectedElement>,
    pub report: DetectionReport,
}

/// Full pipeline with live collaborators (watch mode).
pub struct Pipeline {
    detector: Box<dyn ComponentDetector>,
    recognizer: Box<dyn TextRecognizer>,
    classifier: Option<Box<dyn ElementClassifier>>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        detector: Box<dyn ComponentDetector>,
        recognizer: Box<dyn TextRecognizer>,
        classifier: Option<Box<dyn ElementClassifier>>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            detector,
            recognizer,
            classifier,
            config,
        }
    }

    /// Run one full pass over `frame`.
    ///
    /// Collaborator failures propagate unmasked; the caller aborts the
    /// pass and resumes listening.
    pub fn run(&self, frame: &RgbaImage) -> Result<PassOutput> {
        let pass_start = Instant::now();

        let ocr_start = Instant::now();
        let texts = self.recognizer.recognize(frame)?;
        let ocr_ms = ocr_start.elapsed().as_secs_f64() * 1000.0;
        tracing::info!("OCR: {} text regions in {:.1} ms", texts.len(), ocr_ms);

        let detect_start = Instant::now();
        let raw_components = self.detector.detect(frame)?;
        let detection_ms = detect_start.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(
            "Detection: {} raw components in {:.1} ms",
            raw_components.len(),
            detection_ms
        );

        let mut output = run_pass(
            frame,
            raw_components,
            texts,
            self.classifier.as_deref(),
            &self.config,
        )?;

        output.report.timings.ocr_ms = ocr_ms;
        output.report.timings.detection_ms = detection_ms;
        output.report.timings.total_ms = pass_start.elapsed().as_secs_f64() * 1000.0;

        Ok(output)
    }
}

/// Filter, classify and merge already-obtained detections (offline mode
/// and the tail end of [`Pipeline::run`]).
pub fn run_pass(
    frame: &RgbaImage,
    raw_components: Vec<BoundingBox>,
    texts: Vec<TextDetection>,
    classifier: Option<&dyn ElementClassifier>,
    config: &PipelineConfig,
) -> Result<PassOutput> {
    let mut report = DetectionReport::new(frame.width(), frame.height());
    report.raw_component_count = raw_components.len();
    report.text_count = texts.len();

    // No detections at all is not an error; the pass just has nothing to
    // annotate.
    if raw_components.is_empty() && texts.is_empty() {
        tracing::warn!("Detector and OCR produced no boxes; empty pass");
        return Ok(PassOutput {
            elements: Vec::new(),
            report,
        });
    }

    let filter_start = Instant::now();

    let text_boxes: Vec<BoundingBox> = texts.iter().map(|t| t.bbox).collect();
    let non_text =
        filter_overlapping(raw_components, &text_boxes, config.overlap_threshold)?;
    tracing::info!(
        "Overlap filter: {} -> {} components",
        report.raw_component_count,
        non_text.len()
    );

    let icons = filter_by_size_and_aspect(non_text, &config.icon_filter)?;
    tracing::info!("Size/aspect filter: {} icon candidates", icons.len());

    report.timings.filtering_ms = filter_start.elapsed().as_secs_f64() * 1000.0;

    let classify_start = Instant::now();
    let classified = match classifier {
        Some(classifier) => classify_components(frame, &icons, classifier)?,
        None => HashMap::new(),
    };
    report.timings.classification_ms = classify_start.elapsed().as_secs_f64() * 1000.0;

    let components: Vec<DetectedElement> =
        icons.into_iter().map(DetectedElement::component).collect();
    let elements = merge_and_label(components, &classified, &texts);

    tracing::info!("Pass complete: {} elements", elements.len());

    report.elements = elements.clone();
    Ok(PassOutput { elements, report })
}

/// Crop each component, resize to the classifier's fixed square input, and
/// collect the predicted labels keyed by box.
///
/// Boxes that fall entirely outside the frame are skipped and stay
/// unlabeled.
fn classify_components(
    frame: &RgbaImage,
    components: &[BoundingBox],
    classifier: &dyn ElementClassifier,
) -> Result<HashMap<BoundingBox, ElementClass>> {
    let mut classified = HashMap::with_capacity(components.len());

    for bbox in components {
        let Some(crop) = crop_to_frame(frame, bbox) else {
            tracing::debug!("Skipping classification of off-frame box {:?}", bbox);
            continue;
        };

        let resized = imageops::resize(
            &crop,
            CLASSIFIER_INPUT_SIZE,
            CLASSIFIER_INPUT_SIZE,
            FilterType::Triangle,
        );

        let class = classifier.classify(&resized)?;
        classified.insert(*bbox, class);
    }

    Ok(classified)
}

/// Clip `bbox` to the frame and extract the covered pixels, or `None` when
/// nothing of the box lies inside the frame.
fn crop_to_frame(frame: &RgbaImage, bbox: &BoundingBox) -> Option<RgbaImage> {
    let x_min = bbox.x_min.clamp(0, frame.width() as i32);
    let y_min = bbox.y_min.clamp(0, frame.height() as i32);
    let x_max = bbox.x_max.clamp(0, frame.width() as i32);
    let y_max = bbox.y_max.clamp(0, frame.height() as i32);

    let width = (x_max - x_min) as u32;
    let height = (y_max - y_min) as u32;
    if width == 0 || height == 0 {
        return None;
    }

    Some(imageops::crop_imm(frame, x_min as u32, y_min as u32, width, height).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> BoundingBox {
        BoundingBox::new(x_min, y_min, x_max, y_max).unwrap()
    }

    #[test]
    fn test_empty_inputs_yield_empty_pass() {
        let frame = RgbaImage::new(100, 100);
        let config = PipelineConfig::default();

        let output = run_pass(&frame, Vec::new(), Vec::new(), None, &config).unwrap();
        assert!(output.elements.is_empty());
        assert_eq!(output.report.raw_component_count, 0);
    }

    #[test]
    fn test_crop_to_frame_clips_to_bounds() {
        let frame = RgbaImage::new(50, 50);

        let crop = crop_to_frame(&frame, &bbox(-10, -10, 20, 20)).unwrap();
        assert_eq!((crop.width(), crop.height()), (20, 20));

        assert!(crop_to_frame(&frame, &bbox(60, 60, 80, 80)).is_none());
    }

    #[test]
    fn test_run_pass_filters_text_like_components() {
        let frame = RgbaImage::new(200, 200);
        let mut config = PipelineConfig::default();
        config.icon_filter.min_size = 5;
        config.icon_filter.max_size = 100;
        config.icon_filter.max_aspect_ratio = 5.0;

        let components = vec![bbox(0, 0, 10, 10), bbox(50, 50, 60, 60)];
        let texts = vec![TextDetection {
            bbox: bbox(0, 0, 10, 10),
            text: "Menu".to_string(),
            confidence: None,
        }];

        let output = run_pass(&frame, components, texts, None, &config).unwrap();

        // The text-covered component is gone; the survivor plus the text
        // region remain, components first.
        assert_eq!(output.elements.len(), 2);
        assert_eq!(output.elements[0].bbox, bbox(50, 50, 60, 60));
        assert_eq!(output.elements[1].label.as_deref(), Some("Menu"));
    }
}
