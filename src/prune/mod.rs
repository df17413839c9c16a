//! Survivor selection over the score graph.
//!
//! Three selection policies operate purely on the chain of score edges
//! and frame identities, independent of how the scores were produced.
//! Every policy preserves the first and last frame, returns a non-empty
//! result for non-empty input, and tolerates a graph with no edges (no
//! transition can be identified as redundant, so every frame survives).

mod chain;
mod greedy;
mod threshold;

pub use greedy::prune_to;
pub use threshold::{
    prune_by_threshold, prune_by_threshold_with_cap, prune_by_threshold_with_percentile,
    DEFAULT_NORMALIZATION_PERCENTILE,
};

use crate::frames::FrameNode;
use crate::graph::ScoreGraph;
use std::collections::BTreeSet;

/// The selection policy for one pruning pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionPolicy {
    /// Keep exactly `min(target, frames.len())` frames.
    Count {
        /// Number of frames to keep.
        target: usize,
    },
    /// Keep frames whose normalized transition score passes a threshold.
    Threshold {
        /// Inclusive normalized score threshold in [0, 1].
        threshold: f64,
    },
    /// Threshold selection, capped at a maximum survivor count.
    ThresholdWithCap {
        /// Inclusive normalized score threshold in [0, 1].
        threshold: f64,
        /// Maximum number of survivors.
        max_count: usize,
    },
}

/// Applies the given selection policy.
pub fn select(
    graph: &ScoreGraph,
    frames: &[FrameNode],
    policy: SelectionPolicy,
) -> BTreeSet<u64> {
    let survivors = match policy {
        SelectionPolicy::Count { target } => prune_to(graph, frames, target),
        SelectionPolicy::Threshold { threshold } => prune_by_threshold(graph, frames, threshold),
        SelectionPolicy::ThresholdWithCap {
            threshold,
            max_count,
        } => prune_by_threshold_with_cap(graph, frames, threshold, max_count),
    };

    tracing::info!(
        policy = ?policy,
        input = frames.len(),
        survivors = survivors.len(),
        "Selection complete"
    );
    survivors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisConfig, Analyzer};
    use crate::frames::{sequence, MockDiffer};

    const W: u32 = 640;
    const H: u32 = 480;

    fn analyzed(frame_count: usize) -> (ScoreGraph, Vec<FrameNode>) {
        let frames = sequence(frame_count, 40);
        let mut differ = MockDiffer::new(W, H);
        let graph = Analyzer::new(AnalysisConfig::default()).analyze(
            &mut differ,
            &frames,
            W,
            H,
            |_| {},
        );
        (graph, frames)
    }

    #[test]
    fn test_count_policy_end_to_end() {
        let (graph, frames) = analyzed(40);
        let survivors = select(&graph, &frames, SelectionPolicy::Count { target: 8 });

        assert_eq!(survivors.len(), 8);
        assert!(survivors.contains(&0));
        assert!(survivors.contains(&39));
    }

    #[test]
    fn test_threshold_policy_end_to_end() {
        let (graph, frames) = analyzed(40);
        let survivors = select(&graph, &frames, SelectionPolicy::Threshold { threshold: 0.5 });

        assert!(!survivors.is_empty());
        assert!(survivors.contains(&0));
        assert!(survivors.contains(&39));
    }

    #[test]
    fn test_capped_policy_end_to_end() {
        let (graph, frames) = analyzed(60);
        let survivors = select(
            &graph,
            &frames,
            SelectionPolicy::ThresholdWithCap {
                threshold: 0.1,
                max_count: 6,
            },
        );

        assert!(survivors.len() <= 6);
        assert!(survivors.contains(&0));
        assert!(survivors.contains(&59));
    }

    #[test]
    fn test_every_policy_preserves_boundaries() {
        let (graph, frames) = analyzed(25);
        let policies = [
            SelectionPolicy::Count { target: 5 },
            SelectionPolicy::Threshold { threshold: 0.7 },
            SelectionPolicy::ThresholdWithCap {
                threshold: 0.2,
                max_count: 4,
            },
        ];

        for policy in policies {
            let survivors = select(&graph, &frames, policy);
            assert!(survivors.contains(&0), "{policy:?} dropped first frame");
            assert!(survivors.contains(&24), "{policy:?} dropped last frame");
            assert!(!survivors.is_empty());
        }
    }
}
