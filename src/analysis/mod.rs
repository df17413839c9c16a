//! Transition scoring and run orchestration.
//!
//! Combines the clusterer and tracker into a per-transition information
//! gain score, and drives the whole run in bounded batches.

mod config;
mod gain;
mod pipeline;

pub use config::{AnalysisConfig, ConfigError, FileConfig, SelectionConfig, SelectionMode};
pub use gain::information_gain;
pub use pipeline::Analyzer;
