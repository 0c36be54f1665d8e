use crate::error::{PipelineError, Result};
use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What kind of detection produced an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// Graphical UI component from the component detector.
    Component,
    /// Text region from the OCR engine.
    Text,
}

/// The fixed label set of the pre-trained component classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementClass {
    Button,
    CheckBox,
    Chronometer,
    EditText,
    Image,
    ImageButton,
    NumberPicker,
    RadioButton,
    RatingBar,
    SeekBar,
    Spinner,
    Switch,
    TextView,
}

impl ElementClass {
    /// All classes, in the classifier's output-index order.
    pub const ALL: [ElementClass; 13] = [
        ElementClass::Button,
        ElementClass::CheckBox,
        ElementClass::Chronometer,
        ElementClass::EditText,
        ElementClass::Image,
        ElementClass::ImageButton,
        ElementClass::NumberPicker,
        ElementClass::RadioButton,
        ElementClass::RatingBar,
        ElementClass::SeekBar,
        ElementClass::Spinner,
        ElementClass::Switch,
        ElementClass::TextView,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementClass::Button => "Button",
            ElementClass::CheckBox => "CheckBox",
            ElementClass::Chronometer => "Chronometer",
            ElementClass::EditText => "EditText",
            ElementClass::Image => "Image",
            ElementClass::ImageButton => "ImageButton",
            ElementClass::NumberPicker => "NumberPicker",
            ElementClass::RadioButton => "RadioButton",
            ElementClass::RatingBar => "RatingBar",
            ElementClass::SeekBar => "SeekBar",
            ElementClass::Spinner => "Spinner",
            ElementClass::Switch => "Switch",
            ElementClass::TextView => "TextView",
        }
    }

    /// Class for a raw classifier output index.
    pub fn from_index(index: usize) -> Option<ElementClass> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for ElementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementClass {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|class| class.as_str() == s)
            .copied()
            .ok_or_else(|| PipelineError::UnknownLabel(s.to_string()))
    }
}

/// One surviving UI element after merge and filtering.
///
/// `label` carries the classifier's class name for components and the OCR
/// transcript for text regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedElement {
    pub bbox: BoundingBox,
    pub kind: ElementKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl DetectedElement {
    pub fn component(bbox: BoundingBox) -> Self {
        Self {
            bbox,
            kind: ElementKind::Component,
            label: None,
            confidence: None,
        }
    }

    pub fn text(bbox: BoundingBox, transcript: String, confidence: Option<f32>) -> Self {
        Self {
            bbox,
            kind: ElementKind::Text,
            label: Some(transcript),
            confidence,
        }
    }
}

/// A text region with its recognized transcript, as returned by the OCR
/// collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDetection {
    pub bbox: BoundingBox,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}
