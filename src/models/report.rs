use crate::models::DetectedElement;
use serde::{Deserialize, Serialize};

/// Wall-clock durations of the pipeline stages, in milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageTimings {
    pub ocr_ms: f64,
    pub detection_ms: f64,
    pub filtering_ms: f64,
    pub classification_ms: f64,
    pub total_ms: f64,
}

/// JSON export of one completed analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Dimensions of the analyzed frame.
    pub frame_width: u32,
    pub frame_height: u32,
    /// When the frame was captured (RFC 3339).
    pub captured_at: String,
    /// Raw detector box count before filtering.
    pub raw_component_count: usize,
    /// Text region count from OCR.
    pub text_count: usize,
    pub timings: StageTimings,
    /// The surviving, labeled elements in merge order.
    pub elements: Vec<DetectedElement>,
}

impl DetectionReport {
    pub fn new(frame_width: u32, frame_height: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            captured_at: chrono::Local::now().to_rfc3339(),
            raw_component_count: 0,
            text_count: 0,
            timings: StageTimings::default(),
            elements: Vec::new(),
        }
    }
}
