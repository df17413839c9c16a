//! Frame identity type.

/// A single frame in the ordered input sequence.
///
/// Identity is the only thing the analysis core cares about; the timestamp
/// and locator are opaque pass-through fields owned by the caller (typically
/// a presentation time and a path into an extraction workspace).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameNode {
    /// Stable identifier, unique within one analysis run.
    id: u64,
    /// Opaque timestamp in milliseconds.
    timestamp_ms: u64,
    /// Opaque locator for the frame's pixel content.
    locator: String,
}

impl FrameNode {
    /// Creates a new frame node.
    pub fn new(id: u64, timestamp_ms: u64, locator: impl Into<String>) -> Self {
        Self {
            id,
            timestamp_ms,
            locator: locator.into(),
        }
    }

    /// Returns the stable frame identifier.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the opaque timestamp.
    #[inline]
    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    /// Returns the opaque locator.
    #[inline]
    pub fn locator(&self) -> &str {
        &self.locator
    }
}

/// Builds an id-ordered frame list for `count` frames at a fixed interval.
///
/// Convenience for tests and the demo binary; real callers construct nodes
/// from their extraction workspace.
pub fn sequence(count: usize, interval_ms: u64) -> Vec<FrameNode> {
    (0..count)
        .map(|i| {
            FrameNode::new(
                i as u64,
                i as u64 * interval_ms,
                format!("frame_{i:06}.png"),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_ids_are_ordered() {
        let frames = sequence(5, 40);
        let ids: Vec<u64> = frames.iter().map(FrameNode::id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(frames[3].timestamp_ms(), 120);
    }
}
