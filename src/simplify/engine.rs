use std::f64::consts::PI;

use tracing::trace;

use crate::error::{Result, SimplifyError};
use crate::math::{angles, Point2};
use crate::ring::{Ring, SegmentId};

use super::queue::SegmentQueue;
use super::SimplifyParams;

/// Simplifies one closed ring of coordinates.
///
/// The input is a closed ring of at least 3 distinct points; a duplicate
/// first/last point is accepted. The output repeats the first point at the
/// end.
///
/// # Errors
///
/// - `SimplifyError::DegenerateRing` when fewer than 3 points survive; the
///   caller decides whether to keep the original or drop the shape.
/// - `SimplifyError::TooFewCoordinates` / `NonFiniteCoordinate` on
///   malformed input and `GeometryError::ParameterOutOfRange` on bad
///   tolerances, both checked before any reduction work.
pub fn simplify_ring(coordinates: &[Point2], params: &SimplifyParams) -> Result<Vec<Point2>> {
    params.validate()?;
    let ring = Ring::from_coordinates(coordinates)?;
    run(ring, params)
}

pub(crate) fn run(ring: Ring, params: &SimplifyParams) -> Result<Vec<Point2>> {
    let mut reducer = Reducer {
        ring,
        queue: SegmentQueue::new(),
        params,
    };
    for id in reducer.ring.segment_ids() {
        let length = reducer.ring.length(id);
        reducer.queue.enqueue(id, length);
    }
    reducer.reduce();
    if reducer.ring.len() < 3 {
        return Err(SimplifyError::DegenerateRing.into());
    }
    Ok(reducer.ring.coordinates())
}

/// Shared state of one ring's reduction run. Operators live in the sibling
/// modules and all follow the same discipline: dequeue every segment whose
/// geometry is about to change, edit the ring, re-enqueue the survivors.
pub(crate) struct Reducer<'a> {
    pub(crate) ring: Ring,
    pub(crate) queue: SegmentQueue,
    pub(crate) params: &'a SimplifyParams,
}

impl Reducer<'_> {
    pub(crate) fn reduce(&mut self) {
        while self.ring.len() >= 3 {
            let Some(seg) = self.queue.dequeue_min() else {
                break;
            };
            self.step(seg);
        }
    }

    /// Classifies the popped segment and dispatches to one operator.
    fn step(&mut self, seg: SegmentId) {
        let bend = self.ring.turn_angle(seg);
        if bend > PI - self.params.delta && bend < PI + self.params.delta {
            // This segment and its successor are nearly one straight line.
            self.remove_middle_point(seg);
            return;
        }

        let length = self.ring.length(seg);
        if length > self.params.tau {
            // Settled: long segments are discarded without re-enqueueing.
            trace!(length, "segment settled");
            return;
        }

        let alpha = angles::slope_difference(
            self.ring.slope_angle(self.ring.prev(seg)),
            self.ring.slope_angle(self.ring.next(seg)),
        );
        if alpha <= self.params.epsilon {
            self.conditional_regression(seg);
        } else if PI - alpha <= self.params.epsilon {
            self.translate(seg);
        } else {
            self.join_or_prune(seg);
        }
    }

    /// Collinear merge: drops the vertex between `seg` and its successor.
    ///
    /// The successor is merged away and removed from the queue; the
    /// extended survivor is re-enqueued with its new length.
    pub(crate) fn remove_middle_point(&mut self, seg: SegmentId) {
        let next = self.ring.next(seg);
        self.queue.remove(seg);
        self.queue.remove(next);
        self.ring.merge(seg);
        let length = self.ring.length(seg);
        self.queue.enqueue(seg, length);
        trace!(?seg, length, "collinear merge");
    }
}
