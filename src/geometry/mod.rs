//! Geometric primitives shared across the pipeline.
//!
//! Points are produced per transition by the feature-diff adapter and
//! consumed by the clusterer; bounding boxes describe cluster extents
//! and tracked change regions.

mod bbox;

pub use bbox::BoundingBox;

/// A 2D point in floating-point image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate in pixels.
    pub x: f64,
    /// Vertical coordinate in pixels.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}
