use tracing::{debug, trace};

use crate::error::{Result, SimplisError, SimplifyError};
use crate::math::Point2;
use crate::ring::normalize_closed;
use crate::simplify::{simplify_ring, SimplifyParams};

/// A polygon as one exterior ring and zero or more interior rings (holes).
///
/// Rings are closed coordinate sequences; a duplicate first/last point is
/// accepted on input and always produced on output. No winding order is
/// assumed or enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub exterior: Vec<Point2>,
    pub interiors: Vec<Vec<Point2>>,
}

impl Polygon {
    #[must_use]
    pub fn new(exterior: Vec<Point2>, interiors: Vec<Vec<Point2>>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    #[must_use]
    pub fn with_exterior(exterior: Vec<Point2>) -> Self {
        Self {
            exterior,
            interiors: Vec::new(),
        }
    }

    /// Signed area of the exterior ring (shoelace formula), ignoring holes.
    ///
    /// Positive for counter-clockwise, negative for clockwise. A duplicate
    /// closing point contributes nothing.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let points = &self.exterior;
        let n = points.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            sum += points[i].x * points[j].y - points[j].x * points[i].y;
        }
        sum * 0.5
    }
}

/// Simplifies every ring of the polygon with the same tolerances.
///
/// `Ok(None)` means the exterior ring collapsed below 3 points and the
/// polygon as a whole is rejected. Holes that collapse are dropped from the
/// result instead; the remaining rings come back closed.
///
/// # Errors
///
/// Malformed input (non-finite coordinates, fewer than 3 distinct points in
/// any ring) and out-of-range tolerances are reported before any ring is
/// touched.
pub fn simplify_polygon(polygon: &Polygon, params: &SimplifyParams) -> Result<Option<Polygon>> {
    params.validate()?;
    normalize_closed(&polygon.exterior)?;
    for hole in &polygon.interiors {
        normalize_closed(hole)?;
    }

    let exterior = match simplify_ring(&polygon.exterior, params) {
        Ok(coords) => coords,
        Err(SimplisError::Simplify(SimplifyError::DegenerateRing)) => {
            debug!("exterior ring degenerated, rejecting polygon");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    let mut interiors = Vec::with_capacity(polygon.interiors.len());
    for (i, hole) in polygon.interiors.iter().enumerate() {
        match simplify_ring(hole, params) {
            Ok(coords) => interiors.push(coords),
            Err(SimplisError::Simplify(SimplifyError::DegenerateRing)) => {
                trace!(hole = i, "dropping degenerate interior ring");
            }
            Err(err) => return Err(err),
        }
    }

    Ok(Some(Polygon {
        exterior,
        interiors,
    }))
}
