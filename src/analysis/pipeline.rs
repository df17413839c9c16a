//! Transition analysis orchestration.
//!
//! Walks the frame sequence in overlapping batches, diffing each adjacent
//! pair through the external adapter and running the cluster → track →
//! score pipeline to produce one score edge per transition.

use super::{information_gain, AnalysisConfig};
use crate::cluster;
use crate::frames::{FrameDiffer, FrameNode};
use crate::graph::{ScoreEdge, ScoreGraph};
use crate::tracking::RegionTracker;

/// Orchestrates one analysis run.
///
/// Owns the run's tracker, so persistence spans batch boundaries, and
/// `analyze` consumes the orchestrator: tracker state is path-dependent
/// and must never leak into a second run.
pub struct Analyzer {
    config: AnalysisConfig,
    tracker: RegionTracker,
}

impl Analyzer {
    /// Creates an analyzer for one run.
    ///
    /// A zero `batch_size` is clamped to 1 so the batch loop always
    /// advances; `AnalysisConfig::validate` reports it as an error for
    /// callers that want to reject it instead.
    pub fn new(config: AnalysisConfig) -> Self {
        let mut config = config;
        if config.batch_size == 0 {
            tracing::warn!("batch_size 0 is invalid; clamping to 1");
            config.batch_size = 1;
        }
        let tracker = RegionTracker::new(config.tracker());
        Self { config, tracker }
    }

    /// Scores every adjacent frame pair at the given working scale.
    ///
    /// Frames are processed in overlapping windows of `batch_size + 1` so
    /// the last frame of one batch is the first of the next and every
    /// pair is scored exactly once. A failed diff does not abort the run:
    /// the pair degrades to a zero-score edge, biasing toward keeping the
    /// frame. `progress` receives a fraction in (0, 1] after each batch.
    pub fn analyze<D: FrameDiffer>(
        mut self,
        differ: &mut D,
        frames: &[FrameNode],
        width: u32,
        height: u32,
        mut progress: impl FnMut(f64),
    ) -> ScoreGraph {
        if frames.len() < 2 {
            tracing::info!(frames = frames.len(), "Nothing to analyze");
            return ScoreGraph::default();
        }

        let total_pairs = frames.len() - 1;
        let image_area = width as f64 * height as f64;
        let mut edges = Vec::with_capacity(total_pairs);

        tracing::info!(
            frames = frames.len(),
            batch_size = self.config.batch_size,
            width,
            height,
            "Starting transition analysis"
        );

        let mut start = 0;
        while start < total_pairs {
            let end = (start + self.config.batch_size).min(total_pairs);

            if let Err(e) = differ.prepare_batch(&frames[start..=end]) {
                // Individual pairs will fail and degrade below.
                tracing::warn!(batch_start = start, error = %e, "Batch preparation failed");
            }

            for i in start..end {
                let earlier = &frames[i];
                let later = &frames[i + 1];
                let score = match differ.diff(earlier, later) {
                    Ok(diff) => self.score_transition(&diff.new_points, i as u64, width, height, image_area),
                    Err(e) => {
                        tracing::warn!(
                            source = earlier.id(),
                            target = later.id(),
                            error = %e,
                            "Diff failed; scoring transition as no change"
                        );
                        0.0
                    }
                };
                edges.push(ScoreEdge::new(earlier.id(), later.id(), score));
            }

            progress(end as f64 / total_pairs as f64);
            tracing::debug!(
                scored = end,
                total = total_pairs,
                "Batch complete"
            );
            start = end;
        }

        tracing::info!(edges = edges.len(), "Analysis complete");
        ScoreGraph::new(edges)
    }

    fn score_transition(
        &mut self,
        new_points: &[crate::geometry::Point],
        t: u64,
        width: u32,
        height: u32,
        image_area: f64,
    ) -> f64 {
        let set = cluster::cluster(new_points, width, height);
        let bounds = set.bounds();
        let persistent = self.tracker.update(&bounds, t);
        let weights: Vec<f64> = bounds.iter().map(|b| self.tracker.weight_of(b)).collect();

        information_gain(
            &bounds,
            &set.point_counts(),
            image_area,
            &persistent,
            &weights,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::{sequence, MockDiffer};

    const W: u32 = 640;
    const H: u32 = 480;

    #[test]
    fn test_one_edge_per_adjacent_pair() {
        let frames = sequence(12, 40);
        let mut differ = MockDiffer::new(W, H);
        let graph = Analyzer::new(AnalysisConfig::default()).analyze(
            &mut differ,
            &frames,
            W,
            H,
            |_| {},
        );

        assert_eq!(graph.len(), 11);
        for (i, edge) in graph.edges().iter().enumerate() {
            assert_eq!(edge.source, i as u64);
            assert_eq!(edge.target, i as u64 + 1);
        }
    }

    #[test]
    fn test_batching_covers_every_pair_once() {
        let frames = sequence(10, 40);
        let config = AnalysisConfig {
            batch_size: 3,
            ..Default::default()
        };
        let mut differ = MockDiffer::new(W, H);
        let graph = Analyzer::new(config).analyze(&mut differ, &frames, W, H, |_| {});
        assert_eq!(graph.len(), 9);
    }

    #[test]
    fn test_failed_pair_degrades_to_zero_edge() {
        let frames = sequence(6, 40);
        let mut differ = MockDiffer::new(W, H).fail_on(2, 3);
        let graph = Analyzer::new(AnalysisConfig::default()).analyze(
            &mut differ,
            &frames,
            W,
            H,
            |_| {},
        );

        assert_eq!(graph.len(), 5);
        assert_eq!(graph.edges()[2].score, 0.0);
        // Neighboring transitions still carry signal.
        assert!(graph.edges()[1].score > 0.0);
    }

    #[test]
    fn test_progress_reaches_one() {
        let frames = sequence(20, 40);
        let config = AnalysisConfig {
            batch_size: 6,
            ..Default::default()
        };
        let mut reports = Vec::new();
        let mut differ = MockDiffer::new(W, H);
        Analyzer::new(config).analyze(&mut differ, &frames, W, H, |p| reports.push(p));

        assert!(!reports.is_empty());
        assert!(reports.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*reports.last().unwrap(), 1.0);
    }

    #[test]
    fn test_zero_batch_size_is_clamped() {
        let frames = sequence(5, 40);
        let config = AnalysisConfig {
            batch_size: 0,
            ..Default::default()
        };
        let mut differ = MockDiffer::new(W, H);
        let graph = Analyzer::new(config).analyze(&mut differ, &frames, W, H, |_| {});
        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn test_fewer_than_two_frames_yields_empty_graph() {
        let frames = sequence(1, 40);
        let mut differ = MockDiffer::new(W, H);
        let graph = Analyzer::new(AnalysisConfig::default()).analyze(
            &mut differ,
            &frames,
            W,
            H,
            |_| {},
        );
        assert!(graph.is_empty());
    }

    #[test]
    fn test_recurring_region_is_damped() {
        // The mock differ emits a static corner cluster on every
        // transition. Once it turns persistent its contribution is damped,
        // so later transitions should score below the earliest ones.
        let frames = sequence(30, 40);
        let mut differ = MockDiffer::new(W, H);
        let graph = Analyzer::new(AnalysisConfig::default()).analyze(
            &mut differ,
            &frames,
            W,
            H,
            |_| {},
        );

        let early = graph.edges()[0].score;
        let late = graph.edges()[20].score;
        assert!(late < early, "late {late} should be damped below early {early}");
    }
}
