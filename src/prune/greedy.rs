//! Fixed-count greedy merge selection.
//!
//! Repeatedly removes the target of the globally lowest-scoring
//! transition until the requested number of frames survives. Removal
//! re-links the gap with a synthetic edge carrying the *larger* of the
//! two scores it now bridges, so the dissimilarity barrier between two
//! surviving neighbors reflects the strongest distinction between them
//! and further erosion at that point is discouraged.

use super::chain::FrameChain;
use crate::frames::FrameNode;
use crate::graph::{sanitize_score, ScoreGraph};
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeSet, BinaryHeap, HashMap};

/// A heap entry describing one (possibly superseded) adjacency.
///
/// Entries are never deleted from the heap; staleness is detected on pop
/// by checking endpoint liveness, adjacency, and score currency.
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    score: f64,
    source: u64,
    target: u64,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Scores are sanitized (finite, non-negative) before entering the
        // heap; id tie-breaks keep ordering deterministic.
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.target.cmp(&other.target))
    }
}

/// Selects exactly `min(target_count, frames.len())` survivors by greedy
/// lowest-score merging, preserving the first and last frame.
///
/// With zero edges nothing can be identified as redundant and every frame
/// survives. A target below 2 is raised to 2 whenever the sequence has at
/// least 2 frames, since boundary preservation keeps both ends alive.
pub fn prune_to(graph: &ScoreGraph, frames: &[FrameNode], target_count: usize) -> BTreeSet<u64> {
    let ids: Vec<u64> = frames.iter().map(FrameNode::id).collect();
    let Some(mut chain) = FrameChain::new(&ids) else {
        return BTreeSet::new();
    };

    let target = target_count.max(2.min(ids.len()));
    if chain.alive() <= target {
        return chain.survivors();
    }

    let mut scores: HashMap<(u64, u64), f64> = HashMap::with_capacity(graph.len());
    let mut heap: BinaryHeap<Reverse<HeapEntry>> = BinaryHeap::with_capacity(graph.len());
    for edge in graph.edges() {
        let score = sanitize_score(edge.score);
        scores.insert((edge.source, edge.target), score);
        heap.push(Reverse(HeapEntry {
            score,
            source: edge.source,
            target: edge.target,
        }));
    }

    while chain.alive() > target {
        let Some(Reverse(entry)) = heap.pop() else {
            tracing::debug!(
                alive = chain.alive(),
                target,
                "Merge heap exhausted before reaching target"
            );
            break;
        };

        // Lazy deletion: skip entries whose endpoints are gone, whose
        // adjacency has been re-linked past them, or whose score has been
        // superseded by a synthetic edge.
        if !chain.contains(entry.source) || !chain.contains(entry.target) {
            continue;
        }
        if chain.prev(entry.target) != Some(entry.source) {
            continue;
        }
        if scores.get(&(entry.source, entry.target)) != Some(&entry.score) {
            continue;
        }
        // Boundary protection.
        if entry.target == chain.first() || entry.target == chain.last() {
            continue;
        }

        let Some(right) = chain.next(entry.target) else {
            continue;
        };
        let right_score = scores
            .get(&(entry.target, right))
            .copied()
            .unwrap_or(0.0);

        chain.remove(entry.target);
        scores.remove(&(entry.source, entry.target));
        scores.remove(&(entry.target, right));

        // The weakest link becomes the new neighbor link's strength.
        let synthetic = entry.score.max(right_score);
        scores.insert((entry.source, right), synthetic);
        heap.push(Reverse(HeapEntry {
            score: synthetic,
            source: entry.source,
            target: right,
        }));
    }

    chain.survivors()
}
