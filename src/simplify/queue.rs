use slotmap::SecondaryMap;

use crate::ring::SegmentId;

/// Min-priority queue over ring segments, keyed by the length captured at
/// enqueue time with the segment ID as a deterministic tie-break.
///
/// An indexed binary heap: a position map gives O(log n) removal of
/// arbitrary segments, which the engine needs because neighboring edits
/// invalidate queued segments long before they would be popped. Captured
/// keys stay accurate because every operator dequeues a segment before
/// changing its geometry and re-enqueues it afterwards.
#[derive(Debug, Default)]
pub struct SegmentQueue {
    heap: Vec<(f64, SegmentId)>,
    positions: SecondaryMap<SegmentId, usize>,
}

impl SegmentQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether the segment is currently queued.
    #[must_use]
    pub fn contains(&self, seg: SegmentId) -> bool {
        self.positions.contains_key(seg)
    }

    /// Inserts a segment with the given key; ignored when already queued.
    pub fn enqueue(&mut self, seg: SegmentId, length: f64) {
        if self.positions.contains_key(seg) {
            return;
        }
        let i = self.heap.len();
        self.heap.push((length, seg));
        self.positions.insert(seg, i);
        self.sift_up(i);
    }

    /// Removes and returns the shortest queued segment.
    pub fn dequeue_min(&mut self) -> Option<SegmentId> {
        if self.heap.is_empty() {
            return None;
        }
        let (_, seg) = self.heap.swap_remove(0);
        self.positions.remove(seg);
        if !self.heap.is_empty() {
            self.positions[self.heap[0].1] = 0;
            self.sift_down(0);
        }
        Some(seg)
    }

    /// Removes the segment if queued; no-op otherwise.
    pub fn remove(&mut self, seg: SegmentId) {
        let Some(i) = self.positions.remove(seg) else {
            return;
        };
        if i == self.heap.len() - 1 {
            self.heap.pop();
            return;
        }
        self.heap.swap_remove(i);
        self.positions[self.heap[i].1] = i;
        // The element swapped into the hole may have to move either way.
        if self.sift_down(i) == i {
            self.sift_up(i);
        }
    }

    fn less(a: (f64, SegmentId), b: (f64, SegmentId)) -> bool {
        a.0 < b.0 || (a.0 == b.0 && a.1 < b.1)
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if Self::less(self.heap[i], self.heap[parent]) {
                self.heap.swap(i, parent);
                self.positions[self.heap[i].1] = i;
                self.positions[self.heap[parent].1] = parent;
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) -> usize {
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < self.heap.len() && Self::less(self.heap[left], self.heap[smallest]) {
                smallest = left;
            }
            if right < self.heap.len() && Self::less(self.heap[right], self.heap[smallest]) {
                smallest = right;
            }
            if smallest == i {
                return i;
            }
            self.heap.swap(i, smallest);
            self.positions[self.heap[i].1] = i;
            self.positions[self.heap[smallest].1] = smallest;
            i = smallest;
        }
    }
}
