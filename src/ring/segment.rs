use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a segment in a ring's arena.
    pub struct SegmentId;
}

/// A directed edge of a ring, linked to its cyclic neighbors by ID.
///
/// Between structural edits, `end` equals the next segment's `start` and
/// `start` equals the previous segment's `end`. Endpoints are never mutated
/// directly; the owning [`Ring`](super::Ring) edits are the only mutation
/// path, which is what keeps that closure invariant local to one module.
#[derive(Debug, Clone, Copy)]
pub struct SegmentData {
    pub start: Point2,
    pub end: Point2,
    pub prev: SegmentId,
    pub next: SegmentId,
}
