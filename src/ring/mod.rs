pub mod segment;

pub use segment::{SegmentData, SegmentId};

use slotmap::SlotMap;

use crate::error::SimplifyError;
use crate::math::{angles, Point2};

/// A closed boundary as a circular sequence of directed segments.
///
/// Segments live in a generational arena and reference their cyclic
/// neighbors by [`SegmentId`]. Stale IDs (segments removed by an earlier
/// edit) are detected by the arena, so every structural edit degrades to a
/// silent no-op instead of corrupting the cycle.
///
/// Simplification may shrink a ring below 3 segments; that state is
/// terminal and reported by the engine, not by the ring itself.
#[derive(Debug, Clone)]
pub struct Ring {
    segments: SlotMap<SegmentId, SegmentData>,
    head: SegmentId,
}

/// Checks coordinates for finiteness and drops the duplicate closing point.
///
/// # Errors
///
/// Returns an error when a coordinate is non-finite or fewer than 3 distinct
/// coordinates remain after closure normalization.
pub(crate) fn normalize_closed(coordinates: &[Point2]) -> Result<Vec<Point2>, SimplifyError> {
    for (i, c) in coordinates.iter().enumerate() {
        if !c.x.is_finite() || !c.y.is_finite() {
            return Err(SimplifyError::NonFiniteCoordinate(i));
        }
    }
    let mut open = coordinates.to_vec();
    if open.len() >= 2 && open.first() == open.last() {
        open.pop();
    }
    if open.len() < 3 {
        return Err(SimplifyError::TooFewCoordinates(open.len()));
    }
    Ok(open)
}

impl Ring {
    /// Builds a ring from an ordered closed-ring coordinate sequence.
    ///
    /// A duplicate first/last point is accepted and normalized away; the
    /// wraparound segment is always created.
    ///
    /// # Errors
    ///
    /// Returns an error on non-finite coordinates or fewer than 3 distinct
    /// points.
    pub fn from_coordinates(coordinates: &[Point2]) -> Result<Self, SimplifyError> {
        let open = normalize_closed(coordinates)?;
        let n = open.len();

        let mut segments: SlotMap<SegmentId, SegmentData> = SlotMap::with_capacity_and_key(n);
        let ids: Vec<SegmentId> = (0..n)
            .map(|i| {
                segments.insert(SegmentData {
                    start: open[i],
                    end: open[(i + 1) % n],
                    prev: SegmentId::default(),
                    next: SegmentId::default(),
                })
            })
            .collect();
        for i in 0..n {
            let data = &mut segments[ids[i]];
            data.prev = ids[(i + n - 1) % n];
            data.next = ids[(i + 1) % n];
        }

        Ok(Self {
            segments,
            head: ids[0],
        })
    }

    /// Number of segments currently in the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether `seg` is still part of the ring.
    #[must_use]
    pub fn contains(&self, seg: SegmentId) -> bool {
        self.segments.contains_key(seg)
    }

    #[must_use]
    pub fn start(&self, seg: SegmentId) -> Point2 {
        self.segments[seg].start
    }

    #[must_use]
    pub fn end(&self, seg: SegmentId) -> Point2 {
        self.segments[seg].end
    }

    #[must_use]
    pub fn prev(&self, seg: SegmentId) -> SegmentId {
        self.segments[seg].prev
    }

    #[must_use]
    pub fn next(&self, seg: SegmentId) -> SegmentId {
        self.segments[seg].next
    }

    /// Euclidean length of the segment.
    #[must_use]
    pub fn length(&self, seg: SegmentId) -> f64 {
        let data = &self.segments[seg];
        (data.end - data.start).norm()
    }

    /// Bend angle at the segment's end vertex, between this segment and its
    /// successor, in `[0, π]`. `NaN` when either side is zero-length.
    #[must_use]
    pub fn turn_angle(&self, seg: SegmentId) -> f64 {
        let data = &self.segments[seg];
        angles::turn_angle(data.start, data.end, self.segments[data.next].end)
    }

    /// Absolute direction of the segment in `[0, 2π)`.
    #[must_use]
    pub fn slope_angle(&self, seg: SegmentId) -> f64 {
        let data = &self.segments[seg];
        angles::slope_angle(data.start, data.end)
    }

    /// Segment IDs in traversal order, starting from the current head.
    #[must_use]
    pub fn segment_ids(&self) -> Vec<SegmentId> {
        let mut ids = Vec::with_capacity(self.segments.len());
        if self.segments.is_empty() {
            return ids;
        }
        let mut id = self.head;
        loop {
            ids.push(id);
            id = self.segments[id].next;
            if id == self.head {
                break;
            }
        }
        ids
    }

    /// The ring's closed coordinate sequence (first point repeated at the
    /// end). Empty for an empty ring.
    #[must_use]
    pub fn coordinates(&self) -> Vec<Point2> {
        let ids = self.segment_ids();
        let mut coords = Vec::with_capacity(ids.len() + 1);
        for &id in &ids {
            coords.push(self.segments[id].start);
        }
        if let Some(&first) = ids.first() {
            coords.push(self.segments[first].start);
        }
        coords
    }

    /// Drops the vertex between `seg` and its successor: the successor is
    /// deleted and `seg` absorbs it, its end becoming the successor's old
    /// end. Silent no-op when `seg` is stale or is the only segment left.
    pub fn merge(&mut self, seg: SegmentId) {
        let Some(&SegmentData { next, .. }) = self.segments.get(seg) else {
            return;
        };
        if next == seg {
            return;
        }
        let Some(removed) = self.segments.remove(next) else {
            return;
        };
        let survivor = &mut self.segments[seg];
        survivor.end = removed.end;
        survivor.next = removed.next;
        self.segments[removed.next].prev = seg;
        if self.head == next {
            self.head = seg;
        }
    }

    /// Repositions the segment's endpoints, propagating the new start to the
    /// predecessor's end and the new end to the successor's start so the
    /// closure invariant holds. Silent no-op on a stale ID.
    pub fn update(&mut self, seg: SegmentId, start: Point2, end: Point2) {
        let Some(data) = self.segments.get_mut(seg) else {
            return;
        };
        data.start = start;
        data.end = end;
        let prev = data.prev;
        let next = data.next;
        self.segments[prev].end = start;
        self.segments[next].start = end;
    }

    /// Deletes `seg` and reconnects its neighbors through `join`: the
    /// predecessor's end and the successor's start both become `join`.
    /// Silent no-op on a stale ID.
    pub fn remove_and_rejoin(&mut self, seg: SegmentId, join: Point2) {
        let Some(removed) = self.segments.remove(seg) else {
            return;
        };
        if removed.prev == seg {
            // Removed the last remaining segment.
            self.head = SegmentId::default();
            return;
        }
        {
            let prev = &mut self.segments[removed.prev];
            prev.next = removed.next;
            prev.end = join;
        }
        let next = &mut self.segments[removed.next];
        next.prev = removed.prev;
        next.start = join;
        if self.head == seg {
            self.head = removed.prev;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn square() -> Ring {
        Ring::from_coordinates(&[
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
            Point2::new(0.0, 0.0),
        ])
        .unwrap()
    }

    /// Traces `next` pointers from the head and checks that every segment is
    /// visited exactly once and that endpoints chain up.
    fn assert_well_formed(ring: &Ring) {
        let ids = ring.segment_ids();
        assert_eq!(ids.len(), ring.len(), "cycle does not cover the arena");
        for &id in &ids {
            let next = ring.next(id);
            assert_eq!(ring.prev(next), id, "prev/next links disagree");
            assert!(
                (ring.end(id) - ring.start(next)).norm() < TOL,
                "closure broken between {id:?} and {next:?}"
            );
        }
    }

    // ── construction ──

    #[test]
    fn builds_from_closed_coordinates() {
        let ring = square();
        assert_eq!(ring.len(), 4);
        assert_well_formed(&ring);
    }

    #[test]
    fn accepts_unclosed_coordinates() {
        let ring = Ring::from_coordinates(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ])
        .unwrap();
        assert_eq!(ring.len(), 3);
        assert_well_formed(&ring);
    }

    #[test]
    fn rejects_too_few_coordinates() {
        let err = Ring::from_coordinates(&[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)])
            .unwrap_err();
        assert!(matches!(err, SimplifyError::TooFewCoordinates(2)));
    }

    #[test]
    fn rejects_closed_pair() {
        // Three coordinates but only two distinct points once closed.
        let err = Ring::from_coordinates(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 0.0),
        ])
        .unwrap_err();
        assert!(matches!(err, SimplifyError::TooFewCoordinates(2)));
    }

    #[test]
    fn rejects_non_finite() {
        let err = Ring::from_coordinates(&[
            Point2::new(0.0, 0.0),
            Point2::new(f64::NAN, 0.0),
            Point2::new(0.0, 1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, SimplifyError::NonFiniteCoordinate(1)));
    }

    #[test]
    fn coordinates_round_trip() {
        let coords = square().coordinates();
        assert_eq!(coords.len(), 5);
        assert_eq!(coords.first(), coords.last());
    }

    // ── derived measures ──

    #[test]
    fn measures_on_square() {
        let ring = square();
        let first = ring.segment_ids()[0];
        assert!((ring.length(first) - 4.0).abs() < TOL);
        assert!((ring.turn_angle(first) - std::f64::consts::FRAC_PI_2).abs() < TOL);
        assert!(ring.slope_angle(first).abs() < TOL);
    }

    // ── merge ──

    #[test]
    fn merge_drops_middle_vertex() {
        let mut ring = Ring::from_coordinates(&[
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
        ])
        .unwrap();
        let first = ring.segment_ids()[0];
        ring.merge(first);
        assert_eq!(ring.len(), 4);
        assert!((ring.end(first) - Point2::new(4.0, 0.0)).norm() < TOL);
        assert_well_formed(&ring);
    }

    #[test]
    fn merge_stale_is_noop() {
        let mut ring = square();
        let first = ring.segment_ids()[0];
        let second = ring.next(first);
        ring.merge(first); // deletes `second`
        ring.merge(second); // stale
        assert_eq!(ring.len(), 3);
        assert_well_formed(&ring);
    }

    #[test]
    fn merge_down_to_self_loop() {
        let mut ring = Ring::from_coordinates(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ])
        .unwrap();
        let first = ring.segment_ids()[0];
        ring.merge(first);
        ring.merge(first);
        assert_eq!(ring.len(), 1);
        // A single self-looped segment is terminal; further merges no-op.
        ring.merge(first);
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn merge_repairs_head() {
        let mut ring = square();
        let first = ring.segment_ids()[0];
        let last = ring.prev(first);
        ring.merge(last); // deletes the head segment
        assert_eq!(ring.len(), 3);
        assert_well_formed(&ring);
        assert_eq!(ring.coordinates().len(), 4);
    }

    // ── update ──

    #[test]
    fn update_propagates_to_neighbors() {
        let mut ring = square();
        let first = ring.segment_ids()[0];
        ring.update(
            first,
            Point2::new(0.5, 0.0),
            Point2::new(3.5, 0.0),
        );
        assert!((ring.end(ring.prev(first)) - Point2::new(0.5, 0.0)).norm() < TOL);
        assert!((ring.start(ring.next(first)) - Point2::new(3.5, 0.0)).norm() < TOL);
        assert_well_formed(&ring);
    }

    #[test]
    fn update_stale_is_noop() {
        let mut ring = square();
        let first = ring.segment_ids()[0];
        let second = ring.next(first);
        ring.merge(first);
        ring.update(second, Point2::new(9.0, 9.0), Point2::new(8.0, 8.0));
        assert_well_formed(&ring);
        assert!(ring
            .coordinates()
            .iter()
            .all(|c| (c - Point2::new(9.0, 9.0)).norm() > 1.0));
    }

    // ── remove_and_rejoin ──

    #[test]
    fn remove_and_rejoin_reconnects_through_point() {
        let mut ring = square();
        let first = ring.segment_ids()[0];
        let join = Point2::new(2.0, -1.0);
        ring.remove_and_rejoin(first, join);
        assert_eq!(ring.len(), 3);
        assert_well_formed(&ring);
        assert!(ring.coordinates().iter().any(|c| (c - join).norm() < TOL));
    }

    #[test]
    fn remove_and_rejoin_stale_is_noop() {
        let mut ring = square();
        let first = ring.segment_ids()[0];
        ring.remove_and_rejoin(first, Point2::new(0.0, 0.0));
        ring.remove_and_rejoin(first, Point2::new(5.0, 5.0));
        assert_eq!(ring.len(), 3);
        assert_well_formed(&ring);
    }

    #[test]
    fn remove_and_rejoin_repairs_head() {
        let mut ring = square();
        let head = ring.segment_ids()[0];
        ring.remove_and_rejoin(head, Point2::new(2.0, 0.0));
        assert_eq!(ring.len(), 3);
        assert_well_formed(&ring);
        assert_eq!(ring.coordinates().len(), 4);
    }
}
