//! Threshold selection with non-maximum suppression.
//!
//! Scores are normalized against a fixed percentile of the positive
//! scores rather than the maximum, so one outlier transition cannot
//! suppress everything else. Adjacent passing transitions describe
//! overlapping physical events, so runs of consecutive passing edges are
//! reduced to their local maxima.

use super::greedy::prune_to;
use crate::frames::FrameNode;
use crate::graph::{sanitize_score, ScoreEdge, ScoreGraph};
use std::collections::{BTreeSet, HashMap};

/// Percentile of positive scores used as the normalization reference.
pub const DEFAULT_NORMALIZATION_PERCENTILE: f64 = 0.9;

/// Selects the frames whose incoming transitions pass `threshold` after
/// normalization, reduced by non-maximum suppression, plus the first and
/// last frame.
///
/// The comparison is inclusive: a normalized score exactly equal to the
/// threshold passes.
pub fn prune_by_threshold(
    graph: &ScoreGraph,
    frames: &[FrameNode],
    threshold: f64,
) -> BTreeSet<u64> {
    prune_by_threshold_with_percentile(graph, frames, threshold, DEFAULT_NORMALIZATION_PERCENTILE)
}

/// [`prune_by_threshold`] with an explicit normalization percentile.
pub fn prune_by_threshold_with_percentile(
    graph: &ScoreGraph,
    frames: &[FrameNode],
    threshold: f64,
    percentile: f64,
) -> BTreeSet<u64> {
    if frames.len() < 2 || graph.is_empty() {
        // Without at least one scored transition nothing can be
        // identified as redundant.
        return frames.iter().map(FrameNode::id).collect();
    }

    let mut survivors = BTreeSet::new();
    if let Some(first) = frames.first() {
        survivors.insert(first.id());
    }
    if let Some(last) = frames.last() {
        survivors.insert(last.id());
    }

    let scores: Vec<f64> = graph.edges().iter().map(|e| sanitize_score(e.score)).collect();
    let Some(reference) = percentile_reference(&scores, percentile) else {
        // No positive score anywhere: no transition can pass.
        return survivors;
    };

    let passing: Vec<usize> = scores
        .iter()
        .enumerate()
        .filter(|(_, &s)| (s / reference).min(1.0) >= threshold)
        .map(|(i, _)| i)
        .collect();

    for run in consecutive_runs(&passing) {
        for &idx in &suppress_non_maxima(run, &scores) {
            survivors.insert(graph.edges()[idx].target);
        }
    }

    survivors
}

/// Threshold selection capped at `max_count` survivors.
///
/// When the threshold pass already fits under the cap its result is
/// returned unchanged. Otherwise the survivors are re-linked into a
/// reduced graph whose edge scores are the *minimum* raw score across
/// each spanned gap (the weakest observed distinction in that gap,
/// identifying which already-accepted transitions are least essential)
/// and greedily merged down to the cap.
///
/// A graph with no edges keeps every frame regardless of the cap; with
/// nothing scored there is no basis for merging anything away.
pub fn prune_by_threshold_with_cap(
    graph: &ScoreGraph,
    frames: &[FrameNode],
    threshold: f64,
    max_count: usize,
) -> BTreeSet<u64> {
    let survivors = prune_by_threshold(graph, frames, threshold);
    if graph.is_empty() || survivors.len() <= max_count {
        return survivors;
    }

    tracing::debug!(
        survivors = survivors.len(),
        max_count,
        "Threshold pass over cap; merging down"
    );

    let kept: Vec<FrameNode> = frames
        .iter()
        .filter(|f| survivors.contains(&f.id()))
        .cloned()
        .collect();
    let position: HashMap<u64, usize> = frames
        .iter()
        .enumerate()
        .map(|(i, f)| (f.id(), i))
        .collect();
    let scores: Vec<f64> = graph.edges().iter().map(|e| sanitize_score(e.score)).collect();

    let mut reduced = Vec::with_capacity(kept.len().saturating_sub(1));
    for pair in kept.windows(2) {
        let span = match (position.get(&pair[0].id()), position.get(&pair[1].id())) {
            (Some(&a), Some(&b)) if a < b => &scores[a.min(scores.len())..b.min(scores.len())],
            _ => &[],
        };
        let weakest = span.iter().copied().fold(f64::INFINITY, f64::min);
        let score = if weakest.is_finite() { weakest } else { 0.0 };
        reduced.push(ScoreEdge::new(pair[0].id(), pair[1].id(), score));
    }

    prune_to(&ScoreGraph::new(reduced), &kept, max_count)
}

/// Returns the normalization reference: the value at `percentile` of the
/// positive scores, or `None` if every score is zero.
fn percentile_reference(scores: &[f64], percentile: f64) -> Option<f64> {
    let mut positive: Vec<f64> = scores.iter().copied().filter(|&s| s > 0.0).collect();
    if positive.is_empty() {
        return None;
    }
    positive.sort_by(f64::total_cmp);

    let rank = ((positive.len() - 1) as f64 * percentile.clamp(0.0, 1.0)).round() as usize;
    Some(positive[rank])
}

/// Groups sorted indices into runs of consecutive values.
fn consecutive_runs(indices: &[usize]) -> Vec<&[usize]> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=indices.len() {
        if i == indices.len() || indices[i] != indices[i - 1] + 1 {
            runs.push(&indices[start..i]);
            start = i;
        }
    }
    runs
}

/// Reduces one run of consecutive passing edges to its independent
/// transitions.
///
/// The run is grouped into plateaus of equal score; a plateau strictly
/// above each of its in-run neighbors counts as one detection, keyed to
/// its first index. Adjacent plateaus differ strictly, so every run keeps
/// at least one index, and because equal scores pass or fail a threshold
/// together, a plateau never splits when the threshold rises: the kept
/// set can only shrink as passing runs fragment.
fn suppress_non_maxima(run: &[usize], scores: &[f64]) -> Vec<usize> {
    if run.len() <= 1 {
        return run.to_vec();
    }

    // (first index, score) per maximal equal-score plateau.
    let mut plateaus: Vec<(usize, f64)> = Vec::new();
    for &idx in run {
        match plateaus.last() {
            Some(&(_, score)) if score == scores[idx] => {}
            _ => plateaus.push((idx, scores[idx])),
        }
    }

    let mut kept = Vec::new();
    for (pos, &(first, score)) in plateaus.iter().enumerate() {
        let above_left = pos == 0 || score > plateaus[pos - 1].1;
        let above_right = pos == plateaus.len() - 1 || score > plateaus[pos + 1].1;
        if above_left && above_right {
            kept.push(first);
        }
    }
    kept
}
