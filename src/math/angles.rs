use std::f64::consts::PI;

use super::{Point2, TOLERANCE};

/// Bend angle at vertex `b` between the incoming segment `a → b` and the
/// outgoing segment `b → c`, in `[0, π]`.
///
/// The cosine is clamped to `[-1, 1]` before the inverse cosine so floating
/// round-off cannot leave the domain. A zero-length side yields `NaN`, which
/// fails every range test downstream.
#[must_use]
pub fn turn_angle(a: Point2, b: Point2, c: Point2) -> f64 {
    let ba = a - b;
    let bc = c - b;
    let cosine = ba.dot(&bc) / (ba.norm() * bc.norm());
    cosine.clamp(-1.0, 1.0).acos()
}

/// Direction of the segment `p → q` as an angle in `[0, 2π)`.
#[must_use]
pub fn slope_angle(p: Point2, q: Point2) -> f64 {
    let angle = (q.y - p.y).atan2(q.x - p.x);
    if angle < 0.0 {
        angle + 2.0 * PI
    } else {
        angle
    }
}

/// Shifts whichever of the two slope angles is smaller by 2π when the raw
/// difference exceeds π, so both lie on a common branch of the circle.
#[must_use]
pub fn align_angles(a1: f64, a2: f64) -> (f64, f64) {
    if (a1 - a2).abs() > PI {
        if a1 > a2 {
            (a1, a2 + 2.0 * PI)
        } else {
            (a1 + 2.0 * PI, a2)
        }
    } else {
        (a1, a2)
    }
}

/// Angular difference between two slope angles, folded into `[0, π]`.
///
/// 0 means parallel, π means anti-parallel. The fold takes the minimum of
/// the aligned difference and its complement against 2π.
#[must_use]
pub fn slope_difference(a1: f64, a2: f64) -> f64 {
    let (a1, a2) = align_angles(a1, a2);
    let alpha = (a1 - a2).abs();
    alpha.min((alpha - 2.0 * PI).abs())
}
