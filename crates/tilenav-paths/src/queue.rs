//! Indexed binary min-heap keyed by node index.
//!
//! Entries are ordered by `(priority, insertion_seq)`: lower priorities pop
//! first and ties are broken FIFO. The queue owns the position side table
//! for its members, which is what makes [`PriorityQueue::update_priority`]
//! an O(log n) operation.

#[derive(Debug, Clone, Copy)]
struct Entry {
    idx: usize,
    priority: i32,
    /// Insertion counter, lower = pushed earlier.
    seq: u64,
}

impl Entry {
    #[inline]
    fn before(&self, other: &Entry) -> bool {
        (self.priority, self.seq) < (other.priority, other.seq)
    }
}

/// A min-priority queue over node indices with in-place priority updates.
///
/// Each index may be a member at most once. Pushing an index that is
/// already queued, or updating one that is not, is a logic error and
/// panics.
#[derive(Debug, Clone, Default)]
pub struct PriorityQueue {
    heap: Vec<Entry>,
    /// Heap slot of each member index, `None` when not queued.
    positions: Vec<Option<usize>>,
    seq: u64,
}

impl PriorityQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue pre-sized for indices `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: vec![None; capacity],
            seq: 0,
        }
    }

    /// Number of queued indices.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether `idx` is currently queued.
    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        self.positions.get(idx).is_some_and(Option::is_some)
    }

    /// Current priority of a queued index.
    pub fn priority_of(&self, idx: usize) -> Option<i32> {
        let pos = (*self.positions.get(idx)?)?;
        Some(self.heap[pos].priority)
    }

    /// Remove every entry, keeping allocations.
    pub fn clear(&mut self) {
        for e in self.heap.drain(..) {
            self.positions[e.idx] = None;
        }
        self.seq = 0;
    }

    /// Insert `idx` with the given priority.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is already queued.
    pub fn push(&mut self, idx: usize, priority: i32) {
        if idx >= self.positions.len() {
            self.positions.resize(idx + 1, None);
        }
        assert!(
            self.positions[idx].is_none(),
            "priority queue: index {idx} pushed twice"
        );
        let seq = self.seq;
        self.seq += 1;
        let pos = self.heap.len();
        self.heap.push(Entry { idx, priority, seq });
        self.positions[idx] = Some(pos);
        self.sift_up(pos);
    }

    /// Remove and return the index with the smallest priority, along with
    /// that priority.
    pub fn pop_min(&mut self) -> Option<(usize, i32)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let top = self.heap.pop()?;
        self.positions[top.idx] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((top.idx, top.priority))
    }

    /// Change the priority of a queued index and restore heap order around
    /// its slot. The entry keeps its original insertion rank for ties.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not queued.
    pub fn update_priority(&mut self, idx: usize, priority: i32) {
        let Some(pos) = self.positions.get(idx).copied().flatten() else {
            panic!("priority queue: update of index {idx}, which is not queued");
        };
        let old = self.heap[pos].priority;
        self.heap[pos].priority = priority;
        if priority < old {
            self.sift_up(pos);
        } else if priority > old {
            self.sift_down(pos);
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a].idx] = Some(a);
        self.positions[self.heap[b].idx] = Some(b);
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.heap[pos].before(&self.heap[parent]) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < n && self.heap[left].before(&self.heap[smallest]) {
                smallest = left;
            }
            if right < n && self.heap[right].before(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(q: &mut PriorityQueue) -> Vec<(usize, i32)> {
        std::iter::from_fn(|| q.pop_min()).collect()
    }

    #[test]
    fn pops_in_non_decreasing_order() {
        let mut q = PriorityQueue::with_capacity(16);
        let prios = [42, 7, 19, 7, 0, 88, 3, 19, 64, 1, 5, 5];
        for (i, &p) in prios.iter().enumerate() {
            q.push(i, p);
        }
        assert_eq!(q.len(), prios.len());
        let out = drain(&mut q);
        assert_eq!(out.len(), prios.len());
        assert!(out.windows(2).all(|w| w[0].1 <= w[1].1));
        assert!(q.is_empty());
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut q = PriorityQueue::new();
        q.push(9, 4);
        q.push(2, 4);
        q.push(5, 1);
        q.push(7, 4);
        let order: Vec<_> = drain(&mut q).into_iter().map(|(i, _)| i).collect();
        assert_eq!(order, vec![5, 9, 2, 7]);
    }

    #[test]
    fn membership_tracks_push_and_pop() {
        let mut q = PriorityQueue::with_capacity(4);
        assert!(!q.contains(3));
        q.push(3, 10);
        q.push(1, 20);
        assert!(q.contains(3));
        assert_eq!(q.priority_of(1), Some(20));
        assert_eq!(q.pop_min(), Some((3, 10)));
        assert!(!q.contains(3));
        assert_eq!(q.priority_of(3), None);
        assert!(!q.contains(100));
    }

    #[test]
    fn decrease_moves_ahead_of_equal_peers() {
        let mut q = PriorityQueue::new();
        for i in 0..6 {
            q.push(i, 50);
        }
        q.update_priority(4, 30);
        assert_eq!(q.pop_min(), Some((4, 30)));
        assert_eq!(q.pop_min(), Some((0, 50)));
    }

    #[test]
    fn increase_sinks() {
        let mut q = PriorityQueue::new();
        q.push(0, 1);
        q.push(1, 2);
        q.push(2, 3);
        q.update_priority(0, 10);
        let order: Vec<_> = drain(&mut q).into_iter().map(|(i, _)| i).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn clear_resets_membership() {
        let mut q = PriorityQueue::new();
        q.push(0, 1);
        q.push(3, 2);
        q.clear();
        assert!(q.is_empty());
        assert!(!q.contains(3));
        q.push(3, 5);
        assert_eq!(q.pop_min(), Some((3, 5)));
    }

    #[test]
    #[should_panic(expected = "not queued")]
    fn update_of_non_member_panics() {
        let mut q = PriorityQueue::with_capacity(4);
        q.push(0, 1);
        q.update_priority(2, 0);
    }

    #[test]
    #[should_panic(expected = "pushed twice")]
    fn double_push_panics() {
        let mut q = PriorityQueue::new();
        q.push(1, 1);
        q.push(1, 0);
    }
}
