//! Axis-aligned bounding boxes and overlap computation.
//!
//! Degenerate boxes (zero or negative extent) are valid values throughout
//! the pipeline: they have zero area, overlap nothing, and contribute
//! nothing to any score. They are never an error.

use super::Point;

/// An axis-aligned box in floating-point image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent. May be zero or negative (degenerate).
    pub width: f64,
    /// Vertical extent. May be zero or negative (degenerate).
    pub height: f64,
}

impl BoundingBox {
    /// Creates a new box from its top-left corner and extent.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Computes the tight bounding box of a non-empty point set.
    ///
    /// Returns `None` for an empty slice.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut min_x = first.x;
        let mut min_y = first.y;
        let mut max_x = first.x;
        let mut max_y = first.y;

        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Returns the box area, or 0.0 for degenerate boxes.
    pub fn area(&self) -> f64 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return 0.0;
        }
        self.width * self.height
    }

    /// Returns true if the box has zero area.
    pub fn is_degenerate(&self) -> bool {
        self.area() == 0.0
    }

    /// Intersection-over-union overlap with another box.
    ///
    /// Returns a value in [0, 1]. Disjoint boxes yield exactly 0, as does
    /// any comparison involving a degenerate box.
    pub fn iou(&self, other: &BoundingBox) -> f64 {
        let area_a = self.area();
        let area_b = other.area();
        if area_a == 0.0 || area_b == 0.0 {
            return 0.0;
        }

        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);

        let inter_w = right - left;
        let inter_h = bottom - top;
        if inter_w <= 0.0 || inter_h <= 0.0 {
            return 0.0;
        }

        let intersection = inter_w * inter_h;
        intersection / (area_a + area_b - intersection)
    }
}
