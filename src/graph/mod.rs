//! Transition score graph.
//!
//! The analysis output is an ordered chain of directed score edges, one
//! per adjacent frame pair, forming a simple path over the frame ids.
//! Selection algorithms consume this chain; they never mutate it in place.

/// A scored transition between a frame and its immediate successor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreEdge {
    /// Earlier frame id.
    pub source: u64,
    /// Immediate chronological successor at edge-creation time.
    pub target: u64,
    /// Information gain of the transition. Non-negative and finite in a
    /// well-formed edge.
    pub score: f64,
}

impl ScoreEdge {
    /// Creates a new edge, coercing a malformed score to 0.
    pub fn new(source: u64, target: u64, score: f64) -> Self {
        Self {
            source,
            target,
            score: sanitize_score(score),
        }
    }
}

/// Coerces NaN, infinite, and negative scores to 0 so a single bad
/// upstream value cannot crash selection.
pub fn sanitize_score(score: f64) -> f64 {
    if score.is_finite() && score >= 0.0 {
        score
    } else {
        0.0
    }
}

/// An ordered chain of score edges over one frame sequence.
#[derive(Debug, Clone, Default)]
pub struct ScoreGraph {
    edges: Vec<ScoreEdge>,
}

impl ScoreGraph {
    /// Builds a graph from edges, sanitizing every score.
    pub fn new(edges: Vec<ScoreEdge>) -> Self {
        let edges = edges
            .into_iter()
            .map(|e| ScoreEdge::new(e.source, e.target, e.score))
            .collect();
        Self { edges }
    }

    /// Returns the edges in chain order.
    #[inline]
    pub fn edges(&self) -> &[ScoreEdge] {
        &self.edges
    }

    /// Returns the number of edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
