//! Tracked change region state.

use crate::geometry::BoundingBox;

/// A change region being tracked across transitions.
///
/// Owned exclusively by one [`RegionTracker`](super::RegionTracker) and
/// mutated only by its `update` operation.
#[derive(Debug, Clone)]
pub struct TrackedRegion {
    /// Most recent spatial extent of the region.
    pub(crate) bounds: BoundingBox,
    /// Length of the current consecutive-match streak. At least 1 at
    /// creation and after every match; reset when a transition passes
    /// without a match.
    pub(crate) consecutive_count: u32,
    /// Transition index at which the region last matched.
    pub(crate) last_seen: u64,
    /// Confidence weight in (0, 1], decayed geometrically per elapsed
    /// transition.
    pub(crate) weight: f64,
    /// Transition index up to which decay has been applied, so a gap is
    /// never decayed twice across calls.
    pub(crate) decayed_through: u64,
}

impl TrackedRegion {
    pub(crate) fn new(bounds: BoundingBox, t: u64) -> Self {
        Self {
            bounds,
            consecutive_count: 1,
            last_seen: t,
            weight: 1.0,
            decayed_through: t,
        }
    }

    /// Returns the region's most recent bounding box.
    #[inline]
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Returns the current consecutive-match streak length.
    #[inline]
    pub fn consecutive_count(&self) -> u32 {
        self.consecutive_count
    }

    /// Returns the transition index of the last match.
    #[inline]
    pub fn last_seen(&self) -> u64 {
        self.last_seen
    }

    /// Returns the current confidence weight.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}
