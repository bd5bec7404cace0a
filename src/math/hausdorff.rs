//! Hausdorff distance between polygonal chains, used to check how far a
//! simplified ring strays from its input.

use super::distance_2d::point_to_segment_dist;
use super::{Point2, TOLERANCE};

/// Exact Hausdorff distance between two polygonal chains.
///
/// For polygonal chains the maximum always occurs at a vertex of one chain,
/// so checking every vertex against the opposite chain is exact. O(n·m).
#[must_use]
pub fn polyline_hausdorff(a: &[Point2], b: &[Point2]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut max_dist: f64 = 0.0;
    for &p in a {
        max_dist = max_dist.max(min_dist_to_chain(p, b));
    }
    for &p in b {
        max_dist = max_dist.max(min_dist_to_chain(p, a));
    }
    max_dist
}

/// Minimum distance from a point to a polygonal chain.
fn min_dist_to_chain(p: Point2, chain: &[Point2]) -> f64 {
    if chain.len() == 1 {
        return (p - chain[0]).norm();
    }
    let mut min_dist = f64::INFINITY;
    for w in chain.windows(2) {
        min_dist = min_dist.min(point_to_segment_dist(p, w[0], w[1]));
    }
    min_dist
}
