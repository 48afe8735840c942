//! Simple Binary Heap implementation
//!
//! A straightforward binary min-heap without slot ids. Elements are owned by
//! the heap and cannot be re-prioritised once pushed, so callers that need to
//! lower a key push a fresh entry and skip the stale one when it surfaces.
//!
//! Use [`IndexedBinaryHeap`](crate::indexed_binary::IndexedBinaryHeap) when
//! in-place decrease-key is needed.
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `push`    | O(log n)   |
//! | `pop`     | O(log n)   |
//! | `peek`    | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use indexed_heap_dijkstra::simple_binary::SimpleBinaryHeap;
//!
//! let mut heap = SimpleBinaryHeap::new();
//! heap.push(3);
//! heap.push(1);
//! heap.push(2);
//!
//! assert_eq!(heap.peek(), Some(&1));
//! assert_eq!(heap.pop(), Some(1));
//! assert_eq!(heap.pop(), Some(2));
//! assert_eq!(heap.pop(), Some(3));
//! assert_eq!(heap.pop(), None);
//! ```

use crate::traits::{Compare, NaturalOrder};

/// A simple binary min-heap ordered by an owned comparator
#[derive(Debug, Clone)]
pub struct SimpleBinaryHeap<T, C = NaturalOrder> {
    /// The heap data in array form
    data: Vec<T>,
    cmp: C,
}

impl<T: PartialOrd> SimpleBinaryHeap<T> {
    /// Creates an empty heap ordered by `T`'s own ordering
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T: PartialOrd> Default for SimpleBinaryHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Compare<T>> SimpleBinaryHeap<T, C> {
    /// Creates an empty heap ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            data: Vec::new(),
            cmp,
        }
    }

    /// Creates an empty heap ordered by `cmp` with room for `capacity`
    /// elements before reallocating
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            cmp,
        }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Inserts an element
    pub fn push(&mut self, item: T) {
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
    }

    /// Returns the minimum element without removing it
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Removes and returns the minimum element
    pub fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }

        let last_idx = self.data.len() - 1;
        self.data.swap(0, last_idx);
        let result = self.data.pop();

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        result
    }

    /// Consumes the heap, returning its elements in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.data.len());
        while let Some(item) = self.pop() {
            sorted.push(item);
        }
        sorted
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.cmp.lt(&self.data[index], &self.data[parent]) {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.cmp.lt(&self.data[left], &self.data[smallest]) {
                smallest = left;
            }
            if right < len && self.cmp.lt(&self.data[right], &self.data[smallest]) {
                smallest = right;
            }

            if smallest != index {
                self.data.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl<T, C: Compare<T>> Extend<T> for SimpleBinaryHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}
