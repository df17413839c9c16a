//! Feature-diff adapter boundary.
//!
//! This module defines the trait through which the analysis pipeline
//! obtains "what changed" between two frames, allowing for both a real
//! keypoint-matching backend and a mock implementation for testing.

use super::FrameNode;
use crate::geometry::Point;
use thiserror::Error;

/// Errors that can occur while diffing a frame pair.
///
/// The orchestrator absorbs these per pair (a failed comparison degrades to
/// a zero-score transition); they are surfaced here so adapters can report
/// precisely what went wrong.
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("frame content not found: {0}")]
    FrameNotFound(String),
    #[error("failed to decode frame {0}: {1}")]
    DecodeFailed(String, String),
    #[error("feature matching failed: {0}")]
    MatchFailed(String),
}

/// The result of comparing two consecutive frames.
#[derive(Debug, Clone, Default)]
pub struct FrameDiff {
    /// Feature points present in the second frame but not the first.
    pub new_points: Vec<Point>,
    /// Feature points present in the first frame but not the second.
    ///
    /// Reserved for future use; the current scoring pipeline only consumes
    /// `new_points`.
    pub lost_points: Vec<Point>,
}

/// Trait for feature-diff implementations.
///
/// An implementation owns frame content resolution and raster
/// preprocessing; the pipeline only sees the resulting point sets.
pub trait FrameDiffer {
    /// Called once per batch before its pairs are diffed.
    ///
    /// Lets an adapter preprocess one batch's worth of frames at a time so
    /// in-flight buffers stay bounded. The default does nothing.
    fn prepare_batch(&mut self, frames: &[FrameNode]) -> Result<(), DiffError> {
        let _ = frames;
        Ok(())
    }

    /// Compares two consecutive frames and returns their feature diff.
    fn diff(&mut self, earlier: &FrameNode, later: &FrameNode) -> Result<FrameDiff, DiffError>;
}

/// Mock differ producing deterministic synthetic diffs.
///
/// Emits a cloud of new points whose location drifts with the pair index,
/// plus a fixed-position cluster on every transition that imitates a
/// looping animation (a spinner), so persistence damping is exercised.
#[derive(Debug)]
pub struct MockDiffer {
    width: f64,
    height: f64,
    points_per_cluster: usize,
    fail_pairs: Vec<(u64, u64)>,
}

impl MockDiffer {
    /// Creates a mock differ for the given working scale.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
            points_per_cluster: 24,
            fail_pairs: Vec::new(),
        }
    }

    /// Makes `diff` fail for the given frame-id pair (for testing the
    /// orchestrator's degradation path).
    pub fn fail_on(mut self, earlier: u64, later: u64) -> Self {
        self.fail_pairs.push((earlier, later));
        self
    }

    fn cluster_at(&self, cx: f64, cy: f64, spread: f64) -> impl Iterator<Item = Point> + '_ {
        let n = self.points_per_cluster;
        (0..n).map(move |i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            // Two interleaved rings keep the neighborhood dense enough to
            // cluster at any reasonable working scale.
            let r = if i % 2 == 0 { spread } else { spread * 0.5 };
            Point::new(cx + r * angle.cos(), cy + r * angle.sin())
        })
    }
}

impl FrameDiffer for MockDiffer {
    fn diff(&mut self, earlier: &FrameNode, later: &FrameNode) -> Result<FrameDiff, DiffError> {
        if self.fail_pairs.contains(&(earlier.id(), later.id())) {
            return Err(DiffError::MatchFailed(format!(
                "synthetic failure for pair {} -> {}",
                earlier.id(),
                later.id()
            )));
        }

        let t = later.id() as f64;
        let spread = (self.width.min(self.height) * 0.04).max(2.0);

        // Drifting content cluster, kept clear of the recurring corner
        // cluster so the two never merge at clustering radius.
        let cx = (0.05 + 0.05 * t).rem_euclid(0.55) * self.width + 0.05 * self.width;
        let cy = (0.1 + 0.03 * t).rem_euclid(0.5) * self.height + 0.1 * self.height;
        let mut new_points: Vec<Point> = self.cluster_at(cx, cy, spread).collect();

        // Recurring near-static cluster in the corner, every transition.
        new_points.extend(self.cluster_at(
            self.width * 0.9,
            self.height * 0.9,
            spread,
        ));

        Ok(FrameDiff {
            new_points,
            lost_points: Vec::new(),
        })
    }
}
