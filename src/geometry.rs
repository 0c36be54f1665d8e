use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in pixel coordinates of a captured frame.
///
/// Detectors may emit degenerate boxes (zero width or height); those are
/// representable and carry zero area. A box with `x_min > x_max` or
/// `y_min > y_max` is malformed and fails [`BoundingBox::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl BoundingBox {
    /// Create a validated bounding box.
    pub fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Result<Self> {
        let bbox = Self {
            x_min,
            y_min,
            x_max,
            y_max,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    /// Check the coordinate ordering invariant.
    ///
    /// Deserialized boxes bypass [`BoundingBox::new`], so every filter pass
    /// re-validates its inputs before computing ratios.
    pub fn validate(&self) -> Result<()> {
        if self.x_min > self.x_max {
            return Err(PipelineError::InvalidBox(format!(
                "x_min {} > x_max {}",
                self.x_min, self.x_max
            )));
        }
        if self.y_min > self.y_max {
            return Err(PipelineError::InvalidBox(format!(
                "y_min {} > y_max {}",
                self.y_min, self.y_max
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> u32 {
        (self.x_max - self.x_min).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y_max - self.y_min).max(0) as u32
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// True when the box has zero width or zero height.
    pub fn is_degenerate(&self) -> bool {
        self.area() == 0
    }

    /// Intersection of two boxes, or `None` when they do not overlap.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let x_min = self.x_min.max(other.x_min);
        let y_min = self.y_min.max(other.y_min);
        let x_max = self.x_max.min(other.x_max);
        let y_max = self.y_max.min(other.y_max);

        if x_min >= x_max || y_min >= y_max {
            return None;
        }

        Some(BoundingBox {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Intersection area over the area of `self` (asymmetric containment).
    ///
    /// Measures how much of this box is covered by `other`; 0.0 when the
    /// boxes are disjoint or when `self` has zero area.
    pub fn overlap_ratio(&self, other: &BoundingBox) -> f64 {
        let own_area = self.area();
        if own_area == 0 {
            return 0.0;
        }

        match self.intersection(other) {
            Some(inter) => inter.area() as f64 / own_area as f64,
            None => 0.0,
        }
    }
}
