//! Indexed Binary Heap implementation
//!
//! An array-backed binary min-heap in which every element receives a stable
//! [`SlotId`] when it is pushed. The id stays valid while the element is in the
//! heap and lets the caller ask for that one element to be re-heapified after
//! its key changed outside the heap ([`reposition`](IndexedBinaryHeap::reposition)).
//!
//! Elements are opaque to the heap: ordering comes from a [`Compare`] value
//! passed to every call that moves elements. This allows the elements to be
//! small indices into a table the caller owns and mutates between calls, which
//! is how the Dijkstra traversal in this crate performs decrease-key.
//!
//! # Storage
//!
//! All three tables are sized once, at construction, to the heap's capacity:
//!
//! - the slot array holding `(element, id)` pairs at positions `0..len`
//! - `position_of`, mapping an id to the position currently holding it
//! - a stack of free ids
//!
//! An id goes back on the free stack only when its holder is popped, so two
//! live elements never share an id.
//!
//! # Time Complexity
//!
//! | Operation    | Complexity |
//! |--------------|------------|
//! | `push`       | O(log n)   |
//! | `pop`        | O(log n)   |
//! | `reposition` | O(log n)   |
//! | `peek`       | O(1)       |
//! | `get`        | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use indexed_heap_dijkstra::indexed_binary::IndexedBinaryHeap;
//! use indexed_heap_dijkstra::traits::NaturalOrder;
//!
//! let mut heap = IndexedBinaryHeap::with_capacity(3);
//! heap.push(5, &NaturalOrder);
//! heap.push(3, &NaturalOrder);
//! let eight = heap.push(8, &NaturalOrder);
//!
//! // Lower the key in place, then repair the heap around it
//! *heap.get_mut(eight) = 1;
//! heap.reposition(eight, &NaturalOrder);
//!
//! assert_eq!(heap.pop(&NaturalOrder), Some(1));
//! assert_eq!(heap.pop(&NaturalOrder), Some(3));
//! assert_eq!(heap.pop(&NaturalOrder), Some(5));
//! assert_eq!(heap.pop(&NaturalOrder), None);
//! ```

use std::fmt;

use crate::traits::Compare;

/// Stable handle to an element of an [`IndexedBinaryHeap`]
///
/// Ids are small integers in `0..capacity`. An id is valid from the `push`
/// that returned it until the element is popped; after that it may be handed
/// out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(usize);

impl SlotId {
    /// Returns the raw integer value of this id
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One occupied position of the heap array
#[derive(Debug, Clone)]
struct Slot<T> {
    item: T,
    id: SlotId,
}

/// A fixed-capacity binary min-heap with stable slot ids
///
/// See the [module documentation](self) for the storage layout.
///
/// Contract violations (pushing into a full heap, using a retired id) panic:
/// they indicate a bug in the caller, not a condition to recover from.
#[derive(Debug, Clone)]
pub struct IndexedBinaryHeap<T> {
    /// Heap-ordered slots at positions `0..len`
    slots: Vec<Slot<T>>,
    /// Position of each id, or `VACANT` if the id is not in use
    position_of: Vec<usize>,
    /// Ids available for the next push, top of the stack is handed out first
    free_ids: Vec<SlotId>,
    /// Maximum number of simultaneously stored elements
    capacity: usize,
    /// Validate every invariant after each mutation
    check_invariants: bool,
}

impl<T> IndexedBinaryHeap<T> {
    const VACANT: usize = usize::MAX;

    /// Creates an empty heap able to hold `capacity` elements at once
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            position_of: vec![Self::VACANT; capacity],
            // Reversed so that id 0 sits on top of the stack
            free_ids: (0..capacity).rev().map(SlotId).collect(),
            capacity,
            check_invariants: false,
        }
    }

    /// Enables or disables full validation after every `push`, `pop` and
    /// `reposition`
    ///
    /// Validation is O(n) per operation and meant for debugging.
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }

    /// Returns the maximum number of elements the heap can hold
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns true if no more elements can be pushed
    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    /// Returns true if `slot` currently identifies an element of this heap
    pub fn contains(&self, slot: SlotId) -> bool {
        self.position_of
            .get(slot.0)
            .is_some_and(|&pos| pos != Self::VACANT)
    }

    /// Returns the array position currently holding `slot`, if it is active
    pub fn position(&self, slot: SlotId) -> Option<usize> {
        self.position_of
            .get(slot.0)
            .copied()
            .filter(|&pos| pos != Self::VACANT)
    }

    /// Returns the minimum element without removing it
    pub fn peek(&self) -> Option<&T> {
        self.slots.first().map(|slot| &slot.item)
    }

    /// Returns the element identified by `slot`
    ///
    /// # Panics
    /// Panics if `slot` is not active.
    pub fn get(&self, slot: SlotId) -> &T {
        let pos = self.active_position(slot);
        &self.slots[pos].item
    }

    /// Returns the element identified by `slot` for in-place modification
    ///
    /// If the modification changes the element's order, call
    /// [`reposition`](Self::reposition) before any other heap operation.
    ///
    /// # Panics
    /// Panics if `slot` is not active.
    pub fn get_mut(&mut self, slot: SlotId) -> &mut T {
        let pos = self.active_position(slot);
        &mut self.slots[pos].item
    }

    /// Iterates over the elements in array order (not sorted)
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().map(|slot| &slot.item)
    }

    /// Iterates over `(id, element)` pairs in array order
    pub fn iter_slots(&self) -> impl Iterator<Item = (SlotId, &T)> + '_ {
        self.slots.iter().map(|slot| (slot.id, &slot.item))
    }

    /// Inserts an element and returns its slot id
    ///
    /// The element is placed after the last occupied position and sifted up
    /// while it is strictly less than its parent.
    ///
    /// # Panics
    /// Panics if the heap already holds `capacity` elements.
    pub fn push<C>(&mut self, item: T, cmp: &C) -> SlotId
    where
        C: Compare<T> + ?Sized,
    {
        assert!(
            self.slots.len() < self.capacity,
            "heap capacity exceeded: capacity is {}",
            self.capacity
        );
        let id = match self.free_ids.pop() {
            Some(id) => id,
            None => unreachable!("free id pool empty below capacity"),
        };

        let pos = self.slots.len();
        self.slots.push(Slot { item, id });
        self.position_of[id.0] = pos;
        self.sift_up(pos, cmp);

        self.verify(cmp, "push");
        id
    }

    /// Removes and returns the minimum element
    ///
    /// The last element is moved to the root and sifted down. The popped
    /// element's id is retired and returned to the free pool.
    pub fn pop<C>(&mut self, cmp: &C) -> Option<T>
    where
        C: Compare<T> + ?Sized,
    {
        self.pop_with_slot(cmp).map(|(_, item)| item)
    }

    /// Removes the minimum element, returning it together with the id it held
    ///
    /// The returned id is already retired when this returns.
    pub fn pop_with_slot<C>(&mut self, cmp: &C) -> Option<(SlotId, T)>
    where
        C: Compare<T> + ?Sized,
    {
        if self.slots.is_empty() {
            return None;
        }

        let last = self.slots.len() - 1;
        self.swap(0, last);
        let Slot { item, id } = self.slots.pop()?;

        self.position_of[id.0] = Self::VACANT;
        self.free_ids.push(id);

        if !self.slots.is_empty() {
            self.sift_down(0, cmp);
        }

        self.verify(cmp, "pop");
        Some((id, item))
    }

    /// Restores heap order around `slot` after its element changed in place
    ///
    /// Runs one upward sift followed by one downward sift from the element's
    /// position. For a single monotonic change only one of them moves
    /// anything, so this handles both decreased and increased keys.
    ///
    /// # Panics
    /// Panics if `slot` is not active.
    pub fn reposition<C>(&mut self, slot: SlotId, cmp: &C)
    where
        C: Compare<T> + ?Sized,
    {
        let pos = self.active_position(slot);
        let pos = self.sift_up(pos, cmp);
        self.sift_down(pos, cmp);

        self.verify(cmp, "reposition");
    }

    /// Checks every heap invariant
    ///
    /// - each element is less than or equal to both children
    /// - `position_of` and the stored ids agree for every occupied position
    /// - active ids and free ids together cover `0..capacity` exactly once
    pub fn is_valid<C>(&self, cmp: &C) -> bool
    where
        C: Compare<T> + ?Sized,
    {
        let len = self.slots.len();
        if len > self.capacity || len + self.free_ids.len() != self.capacity {
            return false;
        }

        for pos in 0..len {
            for child in [Self::left_child(pos), Self::right_child(pos)] {
                if child < len && !cmp.le(&self.slots[pos].item, &self.slots[child].item) {
                    return false;
                }
            }
            let id = self.slots[pos].id;
            if self.position_of.get(id.0) != Some(&pos) {
                return false;
            }
        }

        let mut seen = vec![false; self.capacity];
        let ids = self
            .slots
            .iter()
            .map(|slot| slot.id)
            .chain(self.free_ids.iter().copied());
        for id in ids {
            match seen.get_mut(id.0) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }

        self.free_ids
            .iter()
            .all(|id| self.position_of[id.0] == Self::VACANT)
    }

    fn verify<C>(&self, cmp: &C, op: &str)
    where
        C: Compare<T> + ?Sized,
    {
        if self.check_invariants {
            assert!(self.is_valid(cmp), "heap invariant violated after {op}");
        }
    }

    fn active_position(&self, slot: SlotId) -> usize {
        match self.position(slot) {
            Some(pos) => pos,
            None => panic!("retired slot id {slot} used"),
        }
    }

    /// Parent position, with the root as its own parent
    fn parent(pos: usize) -> usize {
        if pos == 0 {
            0
        } else {
            (pos - 1) / 2
        }
    }

    fn left_child(pos: usize) -> usize {
        2 * pos + 1
    }

    fn right_child(pos: usize) -> usize {
        2 * pos + 2
    }

    /// Exchanges two positions and keeps `position_of` in step
    fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.position_of[self.slots[a].id.0] = a;
        self.position_of[self.slots[b].id.0] = b;
    }

    /// Moves the element at `pos` up while it is strictly less than its
    /// parent, returning its final position
    fn sift_up<C>(&mut self, mut pos: usize, cmp: &C) -> usize
    where
        C: Compare<T> + ?Sized,
    {
        while pos != 0 {
            let parent = Self::parent(pos);
            if cmp.lt(&self.slots[pos].item, &self.slots[parent].item) {
                self.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
        pos
    }

    /// Moves the element at `pos` down, swapping with the smaller child while
    /// that child is strictly less
    fn sift_down<C>(&mut self, mut pos: usize, cmp: &C)
    where
        C: Compare<T> + ?Sized,
    {
        let len = self.slots.len();
        loop {
            let left = Self::left_child(pos);
            let right = Self::right_child(pos);
            let mut smallest = pos;

            if left < len && cmp.lt(&self.slots[left].item, &self.slots[smallest].item) {
                smallest = left;
            }
            if right < len && cmp.lt(&self.slots[right].item, &self.slots[smallest].item) {
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

/// Formats the elements in array order as `[ e0 , e1 , e2 ]`
impl<T: fmt::Display> fmt::Display for IndexedBinaryHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i + 1 == self.slots.len() {
                write!(f, " {} ", slot.item)?;
            } else {
                write!(f, " {} ,", slot.item)?;
            }
        }
        write!(f, "]")
    }
}
