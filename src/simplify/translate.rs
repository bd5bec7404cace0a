use tracing::trace;

use crate::ring::SegmentId;

use super::engine::Reducer;

impl Reducer<'_> {
    /// Handles a short segment whose neighbors run nearly anti-parallel:
    /// the ring doubles back, with `seg` bridging the two opposing runs.
    ///
    /// The longer neighbor keeps its heading and the bridge is translated
    /// along the shorter one, which collapses to nothing and is removed.
    /// The bridge keeps its length, so the queue key stays accurate.
    pub(crate) fn translate(&mut self, seg: SegmentId) {
        let prev = self.ring.prev(seg);
        let next = self.ring.next(seg);
        self.queue.remove(prev);
        self.queue.remove(next);

        let prev_len = self.ring.length(prev);
        let next_len = self.ring.length(next);
        let prev_start = self.ring.start(prev);
        let next_end = self.ring.end(next);

        if prev_len < next_len {
            // Slide the bridge backwards along the previous segment.
            let offset = self.ring.end(prev) - prev_start;
            let moved_end = self.ring.end(seg) - offset;
            self.ring.update(seg, prev_start, moved_end);
            self.ring.remove_and_rejoin(prev, prev_start);
            let seg_len = self.ring.length(seg);
            self.queue.enqueue(seg, seg_len);
            let next_len = self.ring.length(next);
            self.queue.enqueue(next, next_len);
        } else if next_len < prev_len {
            // Slide the bridge forwards along the next segment.
            let offset = next_end - self.ring.start(next);
            let moved_start = self.ring.start(seg) + offset;
            self.ring.update(seg, moved_start, next_end);
            self.ring.remove_and_rejoin(next, next_end);
            let seg_len = self.ring.length(seg);
            self.queue.enqueue(seg, seg_len);
            let prev_len = self.ring.length(prev);
            self.queue.enqueue(prev, prev_len);
        } else {
            // Equal runs cancel exactly; both neighbors disappear.
            self.ring.update(seg, prev_start, next_end);
            self.ring.remove_and_rejoin(next, next_end);
            self.ring.remove_and_rejoin(prev, prev_start);
            let seg_len = self.ring.length(seg);
            self.queue.enqueue(seg, seg_len);
        }

        trace!(?seg, prev_len, next_len, "translate");
    }
}
