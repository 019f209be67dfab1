use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry. `Ord` is reversed so the `BinaryHeap` pops the lowest
/// priority first, and among equal priorities the earliest insertion.
struct Entry<T> {
    priority: f64,
    seq: u64,
    element: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority queue with stable ties and no decrease-key.
///
/// An element may be enqueued any number of times; callers that improve a
/// score simply enqueue again and skip the stale copies when they surface.
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        PriorityQueue {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn enqueue(&mut self, element: T, priority: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            element,
        });
    }

    /// Removes the lowest-priority element, or `None` once the queue is empty.
    pub fn dequeue(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.element)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dequeues_in_ascending_priority() {
        let mut queue = PriorityQueue::new();
        queue.enqueue("c", 3.0);
        queue.enqueue("a", 1.0);
        queue.enqueue("b", 2.5);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue(), Some("a"));
        assert_eq!(queue.dequeue(), Some("b"));
        assert_eq!(queue.dequeue(), Some("c"));
        assert_eq!(queue.dequeue(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn equal_priorities_keep_insertion_order() {
        let mut queue = PriorityQueue::new();
        for id in 0..20 {
            queue.enqueue(id, 4.0);
        }
        queue.enqueue(99, 1.0);
        assert_eq!(queue.dequeue(), Some(99));
        let order: Vec<_> = std::iter::from_fn(|| queue.dequeue()).collect();
        assert_eq!(order, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn duplicates_are_kept() {
        let mut queue = PriorityQueue::new();
        queue.enqueue('x', 5.0);
        queue.enqueue('x', 2.0);
        queue.enqueue('y', 3.0);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue(), Some('x'));
        assert_eq!(queue.dequeue(), Some('y'));
        assert_eq!(queue.dequeue(), Some('x'));
    }

    #[test]
    fn empty_queue_yields_none() {
        let mut queue: PriorityQueue<u8> = PriorityQueue::default();
        assert_eq!(queue.dequeue(), None);
    }
}
