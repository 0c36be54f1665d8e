//! Adapters that delegate detection to external processes.
//!
//! The heavy lifting lives in separately installed tools (the UIED
//! detector, an OCR engine, the pre-trained classifier); each adapter
//! writes the frame to a temporary PNG, invokes the configured command with
//! the file path, and parses what comes back on stdout.

use crate::config::CommandSpec;
use crate::detect::{ComponentDetector, ElementClassifier, TextRecognizer};
use crate::error::{PipelineError, Result};
use crate::geometry::BoundingBox;
use crate::models::{ElementClass, TextDetection};
use crate::utils::TempPng;
use image::RgbaImage;
use std::process::Command;

/// Placeholder replaced with the temp image path in command arguments.
/// Commands without the placeholder get the path appended instead.
const IMAGE_PLACEHOLDER: &str = "{image}";

fn run_command(spec: &CommandSpec, image_path: &str) -> std::io::Result<std::process::Output> {
    let mut command = Command::new(&spec.program);

    let mut substituted = false;
    for arg in &spec.args {
        if arg.contains(IMAGE_PLACEHOLDER) {
            command.arg(arg.replace(IMAGE_PLACEHOLDER, image_path));
            substituted = true;
        } else {
            command.arg(arg);
        }
    }
    if !substituted {
        command.arg(image_path);
    }

    command.output()
}

/// Run `spec` against `frame` and hand back stdout as UTF-8.
///
/// Failures are wrapped with `fail` so each adapter reports under its own
/// error variant.
fn invoke(
    spec: &CommandSpec,
    frame: &RgbaImage,
    fail: fn(String) -> PipelineError,
) -> Result<String> {
    let temp = TempPng::write(frame)?;
    let output = run_command(spec, temp.as_str())?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(fail(format!(
            "{} exited with {}: {}",
            spec.program,
            output.status,
            stderr.trim()
        )));
    }

    String::from_utf8(output.stdout)
        .map_err(|e| fail(format!("{} produced non-UTF-8 output: {}", spec.program, e)))
}

/// Component detector backed by an external command emitting a JSON array
/// of `{x_min, y_min, x_max, y_max}` objects.
pub struct CommandDetector {
    spec: CommandSpec,
}

impl CommandDetector {
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }
}

impl ComponentDetector for CommandDetector {
    fn detect(&self, frame: &RgbaImage) -> Result<Vec<BoundingBox>> {
        let stdout = invoke(&self.spec, frame, PipelineError::Detector)?;
        let boxes: Vec<BoundingBox> = serde_json::from_str(&stdout)
            .map_err(|e| PipelineError::Detector(format!("invalid detector output: {}", e)))?;

        for bbox in &boxes {
            bbox.validate()?;
        }

        Ok(boxes)
    }
}

/// OCR engine backed by an external command emitting a JSON array of
/// `{bbox, text, confidence?}` objects.
pub struct CommandRecognizer {
    spec: CommandSpec,
}

impl CommandRecognizer {
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }
}

impl TextRecognizer for CommandRecognizer {
    fn recognize(&self, frame: &RgbaImage) -> Result<Vec<TextDetection>> {
        let stdout = invoke(&self.spec, frame, PipelineError::Ocr)?;
        let texts: Vec<TextDetection> = serde_json::from_str(&stdout)
            .map_err(|e| PipelineError::Ocr(format!("invalid OCR output: {}", e)))?;

        for detection in &texts {
            detection.bbox.validate()?;
        }

        Ok(texts)
    }
}

/// Classifier backed by an external command printing a single class name
/// from the fixed label set.
pub struct CommandClassifier {
    spec: CommandSpec,
}

impl CommandClassifier {
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }
}

impl ElementClassifier for CommandClassifier {
    fn classify(&self, crop: &RgbaImage) -> Result<ElementClass> {
        let stdout = invoke(&self.spec, crop, PipelineError::Classifier)?;
        stdout.trim().parse()
    }
}
