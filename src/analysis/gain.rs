//! Information gain scoring.
//!
//! Turns one transition's clusters into a single scalar summarizing how
//! much visually new content the transition introduced. The score is a
//! raw, unnormalized signal with no fixed upper bound; normalization
//! happens downstream in threshold-based selection.

use crate::geometry::BoundingBox;
use std::collections::BTreeSet;

/// Scores one frame transition.
///
/// Each cluster contributes its image-normalized area times its feature
/// density; clusters flagged as persistent are damped by `(1 - weight)`,
/// so a fully locked-in recurring region contributes nothing. Degenerate
/// clusters contribute zero, and an empty cluster list yields exactly 0.
pub fn information_gain(
    clusters: &[BoundingBox],
    point_counts: &[usize],
    image_area: f64,
    persistent: &BTreeSet<usize>,
    persistence_weights: &[f64],
) -> f64 {
    if image_area <= 0.0 {
        return 0.0;
    }

    let mut total = 0.0;
    for (i, cluster) in clusters.iter().enumerate() {
        let area = cluster.area();
        if area <= 0.0 {
            continue;
        }

        let normalized_area = area / image_area;
        let density = point_counts.get(i).copied().unwrap_or(0) as f64 / area;
        let mut contribution = normalized_area * density;

        if persistent.contains(&i) {
            let weight = persistence_weights.get(i).copied().unwrap_or(0.0);
            contribution *= 1.0 - weight;
        }

        total += contribution;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_persistence() -> BTreeSet<usize> {
        BTreeSet::new()
    }

    #[test]
    fn test_empty_clusters_score_zero() {
        assert_eq!(
            information_gain(&[], &[], 1_000_000.0, &no_persistence(), &[]),
            0.0
        );
    }

    #[test]
    fn test_single_cluster_worked_example() {
        // 100x100 cluster with 10 points in a 1,000,000-area image:
        // 0.01 * (10 / 10,000) = 1e-5
        let clusters = [BoundingBox::new(0.0, 0.0, 100.0, 100.0)];
        let gain = information_gain(&clusters, &[10], 1_000_000.0, &no_persistence(), &[0.0]);
        assert!((gain - 1e-5).abs() < 1e-15);
    }

    #[test]
    fn test_sum_over_disjoint_clusters() {
        let clusters = [
            BoundingBox::new(0.0, 0.0, 100.0, 100.0),
            BoundingBox::new(500.0, 500.0, 200.0, 50.0),
        ];
        let expected = 10.0 / 1_000_000.0 + 25.0 / 1_000_000.0;
        let gain = information_gain(
            &clusters,
            &[10, 25],
            1_000_000.0,
            &no_persistence(),
            &[0.0, 0.0],
        );
        assert!((gain - expected).abs() < 1e-15);
    }

    #[test]
    fn test_degenerate_cluster_contributes_zero() {
        let clusters = [
            BoundingBox::new(0.0, 0.0, 100.0, 0.0),
            BoundingBox::new(0.0, 0.0, 100.0, 100.0),
        ];
        let gain = information_gain(
            &clusters,
            &[50, 10],
            1_000_000.0,
            &no_persistence(),
            &[0.0, 0.0],
        );
        assert!((gain - 1e-5).abs() < 1e-15);
    }

    #[test]
    fn test_persistence_damping() {
        let clusters = [BoundingBox::new(0.0, 0.0, 100.0, 100.0)];
        let undamped = information_gain(&clusters, &[10], 1_000_000.0, &no_persistence(), &[0.8]);

        let mut persistent = BTreeSet::new();
        persistent.insert(0);
        let damped = information_gain(&clusters, &[10], 1_000_000.0, &persistent, &[0.8]);

        assert!(damped < undamped);
        assert!((damped - undamped * 0.2).abs() < 1e-15);
    }

    #[test]
    fn test_fully_locked_in_region_contributes_nothing() {
        let clusters = [BoundingBox::new(0.0, 0.0, 100.0, 100.0)];
        let mut persistent = BTreeSet::new();
        persistent.insert(0);
        let gain = information_gain(&clusters, &[10], 1_000_000.0, &persistent, &[1.0]);
        assert_eq!(gain, 0.0);
    }
}
