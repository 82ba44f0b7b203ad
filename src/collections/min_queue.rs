//! Min-priority queue over `(f64, usize)` pairs.
//!
//! [`std::collections::BinaryHeap`] is a max-heap and `f64` is not `Ord`, so
//! entries are ordered by reversed [`f64::total_cmp`]. Ties on priority pop
//! the smaller item first, which keeps traversal order deterministic.
//!
//! The queue has no decrease-key. Callers push a new entry when a priority
//! improves and discard stale entries when they are popped.
//!
//! # Examples
//!
//! ```
//! use u_numkit::collections::MinQueue;
//!
//! let mut q = MinQueue::new();
//! q.push(3.0, 7);
//! q.push(1.0, 2);
//! q.push(2.0, 5);
//! assert_eq!(q.pop(), Some((1.0, 2)));
//! assert_eq!(q.pop(), Some((2.0, 5)));
//! assert_eq!(q.pop(), Some((3.0, 7)));
//! assert_eq!(q.pop(), None);
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct Entry {
    priority: f64,
    item: usize,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: the heap's maximum is the smallest priority
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.item.cmp(&self.item))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Min-priority queue of `(priority, item)` pairs.
#[derive(Debug, Clone, Default)]
pub struct MinQueue {
    heap: BinaryHeap<Entry>,
}

impl MinQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Inserts `item` with `priority`. O(log n).
    pub fn push(&mut self, priority: f64, item: usize) {
        self.heap.push(Entry { priority, item });
    }

    /// Removes and returns the entry with the smallest priority. O(log n).
    pub fn pop(&mut self) -> Option<(f64, usize)> {
        self.heap.pop().map(|e| (e.priority, e.item))
    }

    /// Returns the entry with the smallest priority without removing it.
    pub fn peek(&self) -> Option<(f64, usize)> {
        self.heap.peek().map(|e| (e.priority, e.item))
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
