use super::{Point2, TOLERANCE};

/// Intersection of the supporting lines of segments `a0 → a1` and `b0 → b1`.
///
/// Returns `None` only when the determinant is exactly zero (parallel
/// lines). Near-parallel lines produce a far-away intersection that callers
/// filter with a distance bound.
#[must_use]
pub fn line_line_intersect(a0: Point2, a1: Point2, b0: Point2, b1: Point2) -> Option<Point2> {
    let t = (a0.x - a1.x) * (b0.y - b1.y) - (a0.y - a1.y) * (b0.x - b1.x);
    if t == 0.0 {
        return None;
    }
    let da = a0.x * a1.y - a0.y * a1.x;
    let db = b0.x * b1.y - b0.y * b1.x;
    let x = da * (b0.x - b1.x) - (a0.x - a1.x) * db;
    let y = da * (b0.y - b1.y) - (a0.y - a1.y) * db;
    Some(Point2::new(x / t, y / t))
}

/// Intersection of the supporting line of `s → e` with the line through `p`
/// of the given tangent, in general (ax + by = c) form.
///
/// Returns `None` when the two lines are parallel (zero determinant).
#[must_use]
pub fn line_tangent_intersect(s: Point2, e: Point2, p: Point2, tan: f64) -> Option<Point2> {
    // Second point on the tangent line, one unit along x.
    let q = Point2::new(p.x + 1.0, p.y + tan);

    let a1 = e.y - s.y;
    let b1 = s.x - e.x;
    let c1 = a1 * s.x + b1 * s.y;
    let a2 = q.y - p.y;
    let b2 = p.x - q.x;
    let c2 = a2 * p.x + b2 * p.y;
    let dt = a1 * b2 - a2 * b1;
    if dt == 0.0 {
        return None;
    }
    Some(Point2::new((b2 * c1 - b1 * c2) / dt, (a1 * c2 - a2 * c1) / dt))
}

/// Orthogonal projection of `p` onto the line through `origin` with the
/// given tangent.
///
/// A zero tangent projects onto the horizontal line through `origin`, an
/// infinite tangent onto the vertical one.
#[must_use]
pub fn project_onto_tangent_line(p: Point2, origin: Point2, tan: f64) -> Point2 {
    if tan == 0.0 {
        Point2::new(p.x, origin.y)
    } else if tan.is_infinite() {
        Point2::new(origin.x, p.y)
    } else {
        let cot = 1.0 / tan;
        let x = (p.x + tan * tan * origin.x + tan * (p.y - origin.y)) / (1.0 + tan * tan);
        let y = (p.y + cot * cot * origin.y + cot * (p.x - origin.x)) / (1.0 + cot * cot);
        Point2::new(x, y)
    }
}

/// Linear interpolation between `a` and `b` at the normalized ratio `t`.
#[must_use]
pub fn lerp(a: Point2, b: Point2, t: f64) -> Point2 {
    Point2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}
