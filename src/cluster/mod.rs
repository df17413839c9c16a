//! Spatial grouping of changed feature points.
//!
//! Turns the flat point set reported by the feature-diff adapter into
//! contiguous change regions, each summarized by a bounding box and a
//! point count. Stateless; one call per frame transition.

mod dbscan;

pub use dbscan::{cluster, cluster_with, Cluster, ClusterParams, ClusterSet};
