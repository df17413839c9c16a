//! Spatio-temporal tracking of recurring change regions.
//!
//! This module gives the pipeline memory across transitions: change
//! regions that keep reappearing in the same place (a loading spinner, a
//! blinking cursor, a looping animation) are recognized and assigned a
//! damping weight so they stop inflating transition scores.

mod region;
mod tracker;

pub use region::TrackedRegion;
pub use tracker::{RegionTracker, TrackerConfig};
