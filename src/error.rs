use std::fmt;

#[derive(Debug)]
pub enum PipelineError {
    // I/O errors
    Io(std::io::Error),
    FileNotFound(String),

    // Geometry errors
    InvalidBox(String),

    // Collaborator errors
    Capture(String),
    Detector(String),
    Ocr(String),
    Classifier(String),
    UnknownLabel(String),

    // Image processing errors
    Image(image::ImageError),

    // Configuration errors
    InvalidConfig(String),

    // Serialization errors
    Json(serde_json::Error),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Io(e) => write!(f, "I/O error: {}", e),
            PipelineError::FileNotFound(path) => write!(f, "File not found: {}", path),
            PipelineError::InvalidBox(msg) => write!(f, "Invalid bounding box: {}", msg),
            PipelineError::Capture(msg) => write!(f, "Screen capture error: {}", msg),
            PipelineError::Detector(msg) => write!(f, "Component detector error: {}", msg),
            PipelineError::Ocr(msg) => write!(f, "OCR error: {}", msg),
            PipelineError::Classifier(msg) => write!(f, "Classifier error: {}", msg),
            PipelineError::UnknownLabel(label) => write!(f, "Unknown element label: {}", label),
            PipelineError::Image(e) => write!(f, "Image processing error: {}", e),
            PipelineError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            PipelineError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

// Conversions
impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(err)
    }
}

impl From<image::ImageError> for PipelineError {
    fn from(err: image::ImageError) -> Self {
        PipelineError::Image(err)
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = PipelineError::InvalidBox("x_min 10 > x_max 5".to_string());
        assert!(err.to_string().contains("x_min 10 > x_max 5"));

        let err = PipelineError::UnknownLabel("Widget".to_string());
        assert!(err.to_string().contains("Widget"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PipelineError = io_err.into();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
