use tracing::trace;

use crate::math::{distance_2d, intersect_2d};
use crate::ring::SegmentId;

use super::engine::Reducer;

impl Reducer<'_> {
    /// Handles a short segment whose neighbors meet at a genuine corner.
    ///
    /// The neighbors' supporting lines are extended to their intersection;
    /// when that corner lies close enough to the popped segment, the segment
    /// is removed and the neighbors reconnect through it. Otherwise the
    /// segment is pruned into whichever neighbor is shorter.
    pub(crate) fn join_or_prune(&mut self, seg: SegmentId) {
        let prev = self.ring.prev(seg);
        let next = self.ring.next(seg);
        let corner = intersect_2d::line_line_intersect(
            self.ring.start(prev),
            self.ring.end(prev),
            self.ring.start(next),
            self.ring.end(next),
        );

        let seg_len = self.ring.length(seg);
        let bound = self.params.gamma.unwrap_or(seg_len).min(self.params.tau);
        if let Some(q) = corner {
            let dist =
                distance_2d::point_to_segment_dist(q, self.ring.start(seg), self.ring.end(seg));
            if dist <= bound {
                self.queue.remove(prev);
                self.queue.remove(next);
                self.ring.remove_and_rejoin(seg, q);
                let prev_len = self.ring.length(prev);
                self.queue.enqueue(prev, prev_len);
                let next_len = self.ring.length(next);
                self.queue.enqueue(next, next_len);
                trace!(?seg, corner = ?q, "join");
                return;
            }
        }

        // No usable corner: merge the segment into the shorter neighbor.
        if self.ring.length(prev) < self.ring.length(next) {
            self.remove_middle_point(prev);
        } else {
            self.remove_middle_point(seg);
        }
        trace!(?seg, "prune");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::ring::Ring;
    use crate::simplify::{SegmentQueue, SimplifyParams};

    const TOL: f64 = 1e-9;

    fn reducer_for<'a>(coords: &[(f64, f64)], params: &'a SimplifyParams) -> Reducer<'a> {
        let coords: Vec<Point2> = coords.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        let ring = Ring::from_coordinates(&coords).unwrap();
        let mut queue = SegmentQueue::new();
        for id in ring.segment_ids() {
            let length = ring.length(id);
            queue.enqueue(id, length);
        }
        Reducer {
            ring,
            queue,
            params,
        }
    }

    #[test]
    fn nearby_corner_joins_the_neighbors() {
        // Clipped rectangle corner: the neighbors' lines meet at (10, 5),
        // well within the notch's own length.
        let params = SimplifyParams {
            tau: 0.1,
            ..SimplifyParams::default()
        };
        let coords = [
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 4.99),
            (9.99, 5.0),
            (0.0, 5.0),
        ];
        let mut reducer = reducer_for(&coords, &params);
        let notch = reducer.ring.segment_ids()[2];
        let prev = reducer.ring.prev(notch);
        let next = reducer.ring.next(notch);
        reducer.queue.remove(notch);

        reducer.join_or_prune(notch);

        assert_eq!(reducer.ring.len(), 4);
        assert!(!reducer.ring.contains(notch));
        assert!((reducer.ring.end(prev) - Point2::new(10.0, 5.0)).norm() < TOL);
        assert!((reducer.ring.start(next) - Point2::new(10.0, 5.0)).norm() < TOL);
        assert!(reducer.queue.contains(prev));
        assert!(reducer.queue.contains(next));
    }

    #[test]
    fn distant_corner_prunes_into_the_segment() {
        // The neighbors' lines intersect almost one unit before the popped
        // segment, far beyond its own length; prev is the longer side, so
        // the segment absorbs its successor instead.
        let params = SimplifyParams::default();
        let coords = [
            (0.0, 0.0),
            (4.0, 0.0),
            (4.05, 0.02),
            (8.0, 0.1),
            (8.0, 3.0),
            (0.0, 3.0),
        ];
        let mut reducer = reducer_for(&coords, &params);
        let short = reducer.ring.segment_ids()[1];
        let prev = reducer.ring.prev(short);
        let next = reducer.ring.next(short);
        reducer.queue.remove(short);

        reducer.join_or_prune(short);

        assert_eq!(reducer.ring.len(), 5);
        assert!(reducer.ring.contains(short));
        assert!(!reducer.ring.contains(next));
        assert!(reducer.ring.contains(prev));
        assert!((reducer.ring.end(short) - Point2::new(8.0, 0.1)).norm() < TOL);
    }

    #[test]
    fn distant_corner_prunes_into_a_shorter_prev() {
        let params = SimplifyParams::default();
        let coords = [
            (2.0, 0.0),
            (4.0, 0.0),
            (4.05, 0.02),
            (9.0, 0.12),
            (9.0, 3.0),
            (2.0, 3.0),
        ];
        let mut reducer = reducer_for(&coords, &params);
        let short = reducer.ring.segment_ids()[1];
        let prev = reducer.ring.prev(short);
        reducer.queue.remove(short);

        reducer.join_or_prune(short);

        // prev (2.0) is shorter than next (~4.95): prev absorbs the segment.
        assert_eq!(reducer.ring.len(), 5);
        assert!(!reducer.ring.contains(short));
        assert!((reducer.ring.end(prev) - Point2::new(4.05, 0.02)).norm() < TOL);
    }

    #[test]
    fn parallel_neighbors_always_prune() {
        let params = SimplifyParams::default();
        let coords = [
            (0.0, 0.0),
            (4.0, 0.0),
            (4.05, 0.05),
            (8.0, 0.05),
            (8.0, 3.0),
            (0.0, 3.0),
        ];
        let mut reducer = reducer_for(&coords, &params);
        let short = reducer.ring.segment_ids()[1];
        let next = reducer.ring.next(short);
        reducer.queue.remove(short);

        reducer.join_or_prune(short);

        assert_eq!(reducer.ring.len(), 5);
        assert!(!reducer.ring.contains(next));
        assert!((reducer.ring.end(short) - Point2::new(8.0, 0.05)).norm() < TOL);
    }

    #[test]
    fn explicit_gamma_tightens_the_join_bound() {
        // Same clipped corner as the join case, but gamma forbids it.
        let params = SimplifyParams {
            tau: 0.1,
            gamma: Some(0.001),
            ..SimplifyParams::default()
        };
        let coords = [
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 4.99),
            (9.99, 5.0),
            (0.0, 5.0),
        ];
        let mut reducer = reducer_for(&coords, &params);
        let notch = reducer.ring.segment_ids()[2];
        let prev = reducer.ring.prev(notch);
        reducer.queue.remove(notch);

        reducer.join_or_prune(notch);

        // Pruned instead: the shorter prev absorbs the notch.
        assert_eq!(reducer.ring.len(), 4);
        assert!(!reducer.ring.contains(notch));
        assert!((reducer.ring.end(prev) - Point2::new(9.99, 5.0)).norm() < TOL);
    }
}
