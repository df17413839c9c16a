//! Doubly-linked survivor order over frame ids.
//!
//! An arena of neighbor links keyed by stable frame id. Removal re-links
//! the removed frame's neighbors in O(1); the ends of the chain are
//! tracked so boundary frames can be protected.

use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy)]
struct Neighbors {
    prev: Option<u64>,
    next: Option<u64>,
}

/// Surviving frames in chronological order.
#[derive(Debug)]
pub(crate) struct FrameChain {
    nodes: HashMap<u64, Neighbors>,
    first: u64,
    last: u64,
}

impl FrameChain {
    /// Builds a chain over the given ordered ids. Returns `None` for an
    /// empty sequence.
    pub(crate) fn new(ids: &[u64]) -> Option<Self> {
        let first = *ids.first()?;
        let last = *ids.last()?;

        let mut nodes = HashMap::with_capacity(ids.len());
        for (i, &id) in ids.iter().enumerate() {
            nodes.insert(
                id,
                Neighbors {
                    prev: if i > 0 { Some(ids[i - 1]) } else { None },
                    next: ids.get(i + 1).copied(),
                },
            );
        }

        Some(Self { nodes, first, last })
    }

    /// Returns true if the frame is still alive.
    pub(crate) fn contains(&self, id: u64) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Current predecessor of a frame.
    pub(crate) fn prev(&self, id: u64) -> Option<u64> {
        self.nodes.get(&id).and_then(|n| n.prev)
    }

    /// Current successor of a frame.
    pub(crate) fn next(&self, id: u64) -> Option<u64> {
        self.nodes.get(&id).and_then(|n| n.next)
    }

    /// First frame of the chain. Never removed.
    pub(crate) fn first(&self) -> u64 {
        self.first
    }

    /// Last frame of the chain. Never removed.
    pub(crate) fn last(&self) -> u64 {
        self.last
    }

    /// Number of surviving frames.
    pub(crate) fn alive(&self) -> usize {
        self.nodes.len()
    }

    /// Removes an interior frame, re-linking its neighbors.
    ///
    /// The caller must not remove the first or last frame.
    pub(crate) fn remove(&mut self, id: u64) {
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        if let Some(prev) = node.prev {
            if let Some(p) = self.nodes.get_mut(&prev) {
                p.next = node.next;
            }
        }
        if let Some(next) = node.next {
            if let Some(n) = self.nodes.get_mut(&next) {
                n.prev = node.prev;
            }
        }
    }

    /// Returns the surviving frame ids.
    pub(crate) fn survivors(&self) -> BTreeSet<u64> {
        self.nodes.keys().copied().collect()
    }
}
