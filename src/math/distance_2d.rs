use super::{Point2, TOLERANCE};

/// Euclidean distance between two points.
#[must_use]
pub fn point_dist(p: Point2, q: Point2) -> f64 {
    (q - p).norm()
}

/// Returns the minimum distance from point `p` to the line segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: Point2, a: Point2, b: Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);

    let closest = Point2::new(a.x + t * d.x, a.y + t * d.y);
    (p - closest).norm()
}
