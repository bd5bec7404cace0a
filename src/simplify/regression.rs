use std::f64::consts::PI;

use tracing::trace;

use crate::math::{angles, distance_2d, intersect_2d, Point2};
use crate::ring::SegmentId;

use super::engine::Reducer;

impl Reducer<'_> {
    /// Handles a short segment whose neighbors run nearly parallel.
    ///
    /// Under the merge-first policy, when both neighbors are themselves
    /// shorter than `tau`, the shorter side is bridged directly if the
    /// bridged segment stays under `tau`; otherwise (and always without the
    /// policy) the full regression runs.
    pub(crate) fn conditional_regression(&mut self, seg: SegmentId) {
        if self.params.merge_first {
            let prev = self.ring.prev(seg);
            let next = self.ring.next(seg);
            let prev_len = self.ring.length(prev);
            let next_len = self.ring.length(next);
            if prev_len < self.params.tau && next_len < self.params.tau {
                if prev_len < next_len {
                    let bridge =
                        distance_2d::point_dist(self.ring.start(prev), self.ring.start(next));
                    if bridge < self.params.tau {
                        self.remove_middle_point(prev);
                        return;
                    }
                } else {
                    let bridge = distance_2d::point_dist(self.ring.end(prev), self.ring.end(next));
                    if bridge < self.params.tau {
                        self.remove_middle_point(seg);
                        return;
                    }
                }
            }
        }
        self.segment_regression(seg);
    }

    /// Repositions `seg` onto a line that blends the position and direction
    /// of its two neighbors, weighted by their lengths.
    ///
    /// Update-only: the segment count is unchanged. The neighbors shrink to
    /// the regression line's ends and are re-enqueued; later pops usually
    /// absorb them through collinear merges or joins.
    pub(crate) fn segment_regression(&mut self, seg: SegmentId) {
        let prev = self.ring.prev(seg);
        let next = self.ring.next(seg);
        self.queue.remove(prev);
        self.queue.remove(next);

        let prev_len = self.ring.length(prev);
        let next_len = self.ring.length(next);
        let seg_len = self.ring.length(seg);
        let ratio = prev_len / (prev_len + next_len);
        let pivot = intersect_2d::lerp(self.ring.start(seg), self.ring.end(seg), ratio);

        let (a1, a2) =
            angles::align_angles(self.ring.slope_angle(prev), self.ring.slope_angle(next));
        let mut angle = a1 * ratio + a2 * (1.0 - ratio);
        if angle > 2.0 * PI {
            angle -= 2.0 * PI;
        }
        let theta = angle.tan();

        let before = self.ring.prev(prev);
        let after = self.ring.next(next);
        let start = self.regressed_endpoint(before, pivot, theta, seg_len, self.ring.start(prev));
        let end = self.regressed_endpoint(after, pivot, theta, seg_len, self.ring.end(next));
        self.ring.update(seg, start, end);

        let prev_len = self.ring.length(prev);
        self.queue.enqueue(prev, prev_len);
        let seg_len = self.ring.length(seg);
        self.queue.enqueue(seg, seg_len);
        let next_len = self.ring.length(next);
        self.queue.enqueue(next, next_len);

        trace!(?seg, pivot = ?pivot, theta, "regression");
    }

    /// Extends the regression line through `pivot` with tangent `theta`
    /// towards the guide segment two hops away. The intersection is used
    /// when it lies within `limit` of the guide; otherwise `fallback` is
    /// projected orthogonally onto the regression line.
    fn regressed_endpoint(
        &self,
        guide: SegmentId,
        pivot: Point2,
        theta: f64,
        limit: f64,
        fallback: Point2,
    ) -> Point2 {
        let guide_start = self.ring.start(guide);
        let guide_end = self.ring.end(guide);
        match intersect_2d::line_tangent_intersect(guide_start, guide_end, pivot, theta) {
            Some(q)
                if distance_2d::point_to_segment_dist(q, guide_start, guide_end) <= limit =>
            {
                q
            }
            _ => intersect_2d::project_onto_tangent_line(fallback, pivot, theta),
        }
    }
}
