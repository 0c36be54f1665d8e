//! Screen capture via the platform capture backends wrapped by `xcap`.

use crate::error::{PipelineError, Result};
use image::RgbaImage;
use xcap::Monitor;

fn capture_error(e: impl std::fmt::Display) -> PipelineError {
    PipelineError::Capture(e.to_string())
}

/// Capture the primary monitor into an owned frame.
///
/// Falls back to the first monitor when none reports itself as primary.
/// The frame is owned by the calling pass and dropped when it completes.
pub fn capture_primary() -> Result<RgbaImage> {
    let monitors = Monitor::all().map_err(capture_error)?;

    if monitors.is_empty() {
        return Err(PipelineError::Capture("no monitors found".to_string()));
    }

    let monitor = monitors
        .iter()
        .find(|m| m.is_primary().unwrap_or(false))
        .unwrap_or(&monitors[0]);

    let name = monitor.name().unwrap_or_else(|_| "<unknown>".to_string());
    tracing::debug!("Capturing monitor: {}", name);

    let frame = monitor.capture_image().map_err(capture_error)?;
    tracing::info!(
        "Captured {}x{} frame from monitor {}",
        frame.width(),
        frame.height(),
        name
    );

    Ok(frame)
}
