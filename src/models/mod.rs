pub mod element;
pub mod report;

pub use element::{DetectedElement, ElementClass, ElementKind, TextDetection};
pub use report::{DetectionReport, StageTimings};
