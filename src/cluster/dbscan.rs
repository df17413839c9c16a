//! Density-based clustering of 2D points.
//!
//! A point belongs to a cluster when enough other points lie within its
//! neighborhood radius; overlapping neighborhoods merge transitively.
//! Points without enough neighbors are noise and are excluded from every
//! bounding box.

use crate::geometry::{BoundingBox, Point};

/// Parameters controlling neighborhood density.
///
/// Both values scale with the working resolution rather than being fixed
/// pixel constants, so the same configuration behaves consistently across
/// frame sizes.
#[derive(Debug, Clone, Copy)]
pub struct ClusterParams {
    /// Neighborhood radius in pixels.
    pub radius: f64,
    /// Minimum number of *other* points within the radius for a point to
    /// seed or extend a cluster.
    pub min_neighbors: usize,
}

/// Radius as a fraction of the image diagonal.
const RADIUS_DIAGONAL_FRACTION: f64 = 0.025;
/// Density floor; clusters of fewer points than this never form.
const DEFAULT_MIN_NEIGHBORS: usize = 4;

impl ClusterParams {
    /// Derives parameters from the working scale.
    pub fn for_scale(width: u32, height: u32) -> Self {
        let diagonal = ((width as f64).powi(2) + (height as f64).powi(2)).sqrt();
        Self {
            radius: (diagonal * RADIUS_DIAGONAL_FRACTION).max(1.0),
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
        }
    }
}

/// One contiguous change region.
#[derive(Debug, Clone, Copy)]
pub struct Cluster {
    /// Tight bounding box of the cluster's member points.
    pub bounds: BoundingBox,
    /// Number of member points.
    pub point_count: usize,
}

/// Clustering output for one frame transition.
#[derive(Debug, Clone, Default)]
pub struct ClusterSet {
    /// Per input point: the cluster it belongs to, or `None` for noise.
    pub labels: Vec<Option<usize>>,
    /// Clusters indexed by label.
    pub clusters: Vec<Cluster>,
}

impl ClusterSet {
    /// Returns the cluster bounding boxes indexed by label.
    pub fn bounds(&self) -> Vec<BoundingBox> {
        self.clusters.iter().map(|c| c.bounds).collect()
    }

    /// Returns the per-cluster point counts indexed by label.
    pub fn point_counts(&self) -> Vec<usize> {
        self.clusters.iter().map(|c| c.point_count).collect()
    }
}

/// Clusters points with parameters derived from the working scale.
pub fn cluster(points: &[Point], width: u32, height: u32) -> ClusterSet {
    cluster_with(points, &ClusterParams::for_scale(width, height))
}

/// Clusters points with explicit parameters.
///
/// Tolerates an empty input (returns empty labels and clusters).
pub fn cluster_with(points: &[Point], params: &ClusterParams) -> ClusterSet {
    if points.is_empty() {
        return ClusterSet::default();
    }

    let neighborhoods = build_neighborhoods(points, params.radius);
    let mut labels: Vec<Option<usize>> = vec![None; points.len()];
    let mut visited = vec![false; points.len()];
    let mut clusters = Vec::new();

    for seed in 0..points.len() {
        if visited[seed] || neighborhoods[seed].len() < params.min_neighbors {
            continue;
        }

        // Grow a new cluster outward from this core point. Border points
        // (dense enough to join, not dense enough to extend) are absorbed
        // but not expanded.
        let label = clusters.len();
        let mut members: Vec<usize> = Vec::new();
        let mut frontier = vec![seed];
        visited[seed] = true;

        while let Some(current) = frontier.pop() {
            labels[current] = Some(label);
            members.push(current);

            if neighborhoods[current].len() < params.min_neighbors {
                continue;
            }
            for &neighbor in &neighborhoods[current] {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    frontier.push(neighbor);
                }
            }
        }

        let member_points: Vec<Point> = members.iter().map(|&i| points[i]).collect();
        // `members` is non-empty, so the enclosing box always exists.
        if let Some(bounds) = BoundingBox::enclosing(&member_points) {
            clusters.push(Cluster {
                bounds,
                point_count: members.len(),
            });
        }
    }

    ClusterSet { labels, clusters }
}

/// Indexes, per point, the other points within `radius`.
fn build_neighborhoods(points: &[Point], radius: f64) -> Vec<Vec<usize>> {
    let mut neighborhoods = vec![Vec::new(); points.len()];
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if points[i].distance_to(&points[j]) <= radius {
                neighborhoods[i].push(j);
                neighborhoods[j].push(i);
            }
        }
    }
    neighborhoods
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_cluster(cx: f64, cy: f64, side: usize, step: f64) -> Vec<Point> {
        let mut points = Vec::new();
        for r in 0..side {
            for c in 0..side {
                points.push(Point::new(cx + c as f64 * step, cy + r as f64 * step));
            }
        }
        points
    }

    #[test]
    fn test_empty_input() {
        let set = cluster(&[], 640, 480);
        assert!(set.labels.is_empty());
        assert!(set.clusters.is_empty());
    }

    #[test]
    fn test_two_separated_groups() {
        let mut points = grid_cluster(10.0, 10.0, 3, 2.0);
        points.extend(grid_cluster(300.0, 300.0, 3, 2.0));

        let set = cluster(&points, 640, 480);
        assert_eq!(set.clusters.len(), 2);
        assert_eq!(set.clusters[0].point_count, 9);
        assert_eq!(set.clusters[1].point_count, 9);
        assert!(set.labels.iter().all(|l| l.is_some()));
    }

    #[test]
    fn test_isolated_points_are_noise() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(500.0, 10.0),
            Point::new(100.0, 400.0),
        ];
        let set = cluster(&points, 640, 480);
        assert!(set.clusters.is_empty());
        assert!(set.labels.iter().all(|l| l.is_none()));
    }

    #[test]
    fn test_noise_excluded_from_bounds() {
        let mut points = grid_cluster(50.0, 50.0, 3, 2.0);
        points.push(Point::new(600.0, 400.0)); // far outlier

        let set = cluster(&points, 640, 480);
        assert_eq!(set.clusters.len(), 1);
        assert_eq!(set.labels.last().copied().flatten(), None);

        let bounds = set.clusters[0].bounds;
        assert!(bounds.x + bounds.width < 100.0);
        assert!(bounds.y + bounds.height < 100.0);
    }

    #[test]
    fn test_radius_scales_with_resolution() {
        let small = ClusterParams::for_scale(320, 240);
        let large = ClusterParams::for_scale(1920, 1080);
        assert!(large.radius > small.radius * 4.0);
        assert_eq!(small.min_neighbors, large.min_neighbors);
    }

    #[test]
    fn test_transitive_merge() {
        // A chain of dense patches whose neighborhoods overlap end to end
        // must form one cluster, not several.
        let mut points = Vec::new();
        for i in 0..5 {
            points.extend(grid_cluster(20.0 + i as f64 * 8.0, 20.0, 3, 2.0));
        }
        let set = cluster(&points, 640, 480);
        assert_eq!(set.clusters.len(), 1);
        assert_eq!(set.clusters[0].point_count, points.len());
    }
}
