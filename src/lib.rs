//! Frame Distillation Library
//!
//! Selects a small, visually-representative subset of frames from a long
//! ordered frame sequence. Each adjacent pair of frames is scored for how
//! much visually new content the transition introduced, and the resulting
//! score chain is pruned under one of three selection policies.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! diff adapter → cluster → tracking → analysis (scoring) → prune
//!                                ↓
//!                    persistence damping (recurring regions)
//! ```
//!
//! # Design Principles
//!
//! - **Keep on doubt**: a failed frame comparison scores as "no change,"
//!   biasing toward keeping frames rather than dropping them
//! - **Boundary preservation**: the first and last frame of the sequence
//!   survive every selection policy
//! - **Recurring change is not information**: regions that keep changing
//!   in place (spinners, looping animations) are tracked and damped
//! - **Degenerate input is data**: empty point sets, zero-area boxes, and
//!   malformed scores degrade to zero contributions, never errors
//!
//! # Example
//!
//! ```no_run
//! use frame_distill::{
//!     analysis::{AnalysisConfig, Analyzer},
//!     frames::{sequence, MockDiffer},
//!     prune::{select, SelectionPolicy},
//! };
//!
//! let frames = sequence(120, 40);
//! let mut differ = MockDiffer::new(640, 480);
//!
//! let analyzer = Analyzer::new(AnalysisConfig::default());
//! let graph = analyzer.analyze(&mut differ, &frames, 640, 480, |p| {
//!     println!("progress: {:.0}%", p * 100.0);
//! });
//!
//! let survivors = select(&graph, &frames, SelectionPolicy::Count { target: 12 });
//! for id in &survivors {
//!     println!("keep frame {id}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod cluster;
pub mod frames;
pub mod geometry;
pub mod graph;
pub mod prune;
pub mod tracking;

// Re-export commonly used types at crate root
pub use analysis::{AnalysisConfig, Analyzer, FileConfig, SelectionConfig, SelectionMode};
pub use cluster::{Cluster, ClusterParams, ClusterSet};
pub use frames::{DiffError, FrameDiff, FrameDiffer, FrameNode, MockDiffer};
pub use geometry::{BoundingBox, Point};
pub use graph::{ScoreEdge, ScoreGraph};
pub use prune::{
    prune_by_threshold, prune_by_threshold_with_cap, prune_to, select, SelectionPolicy,
};
pub use tracking::{RegionTracker, TrackedRegion, TrackerConfig};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
