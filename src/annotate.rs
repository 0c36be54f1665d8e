//! Draws the final element set onto a copy of the captured frame.

use crate::error::{PipelineError, Result};
use crate::models::{DetectedElement, ElementKind};
use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::Path;

const COMPONENT_COLOR: Rgba<u8> = Rgba([0, 200, 0, 255]);
const TEXT_COLOR: Rgba<u8> = Rgba([66, 133, 244, 255]);
const LABEL_SCALE: f32 = 14.0;
const STROKE_WIDTH: i32 = 2;

pub struct Annotator {
    font: Option<FontVec>,
}

impl Annotator {
    /// Annotator without label text; rectangles only.
    pub fn new() -> Self {
        Self { font: None }
    }

    /// Annotator that also renders label strings, using the TTF/OTF font
    /// at `path`.
    pub fn with_font(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|_| PipelineError::FileNotFound(path.display().to_string()))?;
        let font = FontVec::try_from_vec(bytes).map_err(|e| {
            PipelineError::InvalidConfig(format!(
                "unreadable label font {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self { font: Some(font) })
    }

    /// Draw one rectangle per element onto a copy of `frame`.
    ///
    /// Components and text regions get distinct colors; labels are drawn
    /// above each box when a font is loaded. The input frame is untouched.
    pub fn annotate(&self, frame: &RgbaImage, elements: &[DetectedElement]) -> RgbaImage {
        let mut canvas = frame.clone();

        for element in elements {
            let color = match element.kind {
                ElementKind::Component => COMPONENT_COLOR,
                ElementKind::Text => TEXT_COLOR,
            };

            draw_box(&mut canvas, element, color);

            if let (Some(font), Some(label)) = (&self.font, element.label.as_deref()) {
                // Label sits just above the box, clamped to the frame.
                let x = element.bbox.x_min.max(0);
                let y = (element.bbox.y_min - LABEL_SCALE as i32 - 2).max(0);
                draw_text_mut(
                    &mut canvas,
                    color,
                    x,
                    y,
                    PxScale::from(LABEL_SCALE),
                    font,
                    label,
                );
            }
        }

        canvas
    }
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new()
    }
}

/// Hollow rectangle with a stroke drawn as concentric 1 px rects.
fn draw_box(canvas: &mut RgbaImage, element: &DetectedElement, color: Rgba<u8>) {
    let bbox = &element.bbox;
    let width = bbox.width();
    let height = bbox.height();

    if width == 0 || height == 0 {
        return;
    }

    for offset in 0..STROKE_WIDTH {
        let w = width as i32 - offset * 2;
        let h = height as i32 - offset * 2;
        if w <= 0 || h <= 0 {
            break;
        }
        let rect = Rect::at(bbox.x_min + offset, bbox.y_min + offset).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}
