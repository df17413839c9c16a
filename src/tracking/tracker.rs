//! Region tracking engine.

use super::TrackedRegion;
use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A region whose weight decays to or below this is discarded, bounding
/// memory regardless of run length.
const WEIGHT_FLOOR: f64 = 0.01;

/// Tracker matching and decay parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Minimum IoU for a cluster to match an existing region.
    ///
    /// Intentionally strict: only near-static repeating regions should be
    /// flagged, not generally similar content.
    pub iou_threshold: f64,
    /// Consecutive matches required before a region counts as persistent.
    pub persistence_threshold: u32,
    /// Geometric weight decay per elapsed transition.
    pub decay_factor: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.9,
            persistence_threshold: 5,
            decay_factor: 0.95,
        }
    }
}

/// Tracks change regions across consecutive transitions.
///
/// One instance per analysis run. State is path-dependent: transitions
/// must be observed in chronological order, and an instance must never be
/// shared between runs.
pub struct RegionTracker {
    config: TrackerConfig,
    regions: Vec<TrackedRegion>,
}

impl RegionTracker {
    /// Creates a tracker with the given configuration.
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            regions: Vec::new(),
        }
    }

    /// Observes the clusters of transition `t` and returns the indices of
    /// clusters that matched a persistent region.
    ///
    /// `t` must be monotonically increasing across calls but need not be
    /// contiguous; the elapsed gap drives weight decay.
    pub fn update(&mut self, clusters: &[BoundingBox], t: u64) -> BTreeSet<usize> {
        // Decay every region through `t` exactly once. A region matched
        // this call has already paid its gap decay here; a region that
        // stays unseen keeps paying per elapsed transition.
        for region in &mut self.regions {
            let gap = t.saturating_sub(region.decayed_through);
            if gap > 0 {
                region.weight *= self.config.decay_factor.powi(gap as i32);
                region.decayed_through = t;
            }
        }

        let mut persistent = BTreeSet::new();
        let mut matched_regions: Vec<bool> = vec![false; self.regions.len()];
        // Regions born this call are appended after matching so a cluster
        // never matches a region created by an earlier cluster of the same
        // transition.
        let mut born: Vec<TrackedRegion> = Vec::new();

        for (cluster_idx, cluster) in clusters.iter().enumerate() {
            let mut best: Option<(usize, f64)> = None;
            for (region_idx, region) in self.regions.iter().enumerate() {
                if matched_regions[region_idx] {
                    continue;
                }
                let overlap = region.bounds.iou(cluster);
                if overlap > self.config.iou_threshold
                    && best.map_or(true, |(_, b)| overlap > b)
                {
                    best = Some((region_idx, overlap));
                }
            }

            match best {
                Some((region_idx, _)) => {
                    matched_regions[region_idx] = true;
                    let region = &mut self.regions[region_idx];
                    region.bounds = *cluster;
                    region.consecutive_count += 1;
                    region.last_seen = t;
                    if region.consecutive_count >= self.config.persistence_threshold {
                        persistent.insert(cluster_idx);
                        tracing::trace!(
                            cluster = cluster_idx,
                            streak = region.consecutive_count,
                            weight = region.weight,
                            "Region persistent"
                        );
                    }
                }
                None => {
                    born.push(TrackedRegion::new(*cluster, t));
                }
            }
        }

        // A transition without a match breaks the streak.
        for (region_idx, matched) in matched_regions.iter().enumerate() {
            if !matched {
                self.regions[region_idx].consecutive_count = 0;
            }
        }
        self.regions.append(&mut born);

        let before = self.regions.len();
        self.regions.retain(|r| r.weight > WEIGHT_FLOOR);
        if self.regions.len() < before {
            tracing::debug!(
                discarded = before - self.regions.len(),
                remaining = self.regions.len(),
                "Discarded decayed regions"
            );
        }

        persistent
    }

    /// Returns the damping weight for a cluster: the maximum weight among
    /// persistent regions overlapping it above the IoU threshold, or 0.0.
    pub fn weight_of(&self, cluster: &BoundingBox) -> f64 {
        self.regions
            .iter()
            .filter(|r| r.consecutive_count >= self.config.persistence_threshold)
            .filter(|r| r.bounds.iou(cluster) > self.config.iou_threshold)
            .map(|r| r.weight)
            .fold(0.0, f64::max)
    }

    /// Returns the currently tracked regions.
    pub fn regions(&self) -> &[TrackedRegion] {
        &self.regions
    }
}
