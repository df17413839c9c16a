//! Frame identity and the feature-diff boundary.
//!
//! The core never touches pixel data. Frames are identified by stable
//! integer ids, and the comparison of two frames is delegated to an
//! external [`FrameDiffer`] adapter that resolves pixel content itself.

mod differ;
mod node;

pub use differ::{DiffError, FrameDiff, FrameDiffer, MockDiffer};
pub use node::{sequence, FrameNode};
