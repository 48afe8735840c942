//! Ordering contract shared by the heaps in this crate
//!
//! The heaps never look inside their elements. Every comparison goes through a
//! [`Compare`] value supplied by the caller, which only has to answer
//! "less than" and "less or equal".
//!
//! Passing the comparator per call (instead of storing it in the heap) is what
//! lets an element be a plain index into a table the caller keeps mutating:
//! the comparator borrows the table only for the duration of one heap call.
//!
//! # Example
//!
//! ```rust
//! use indexed_heap_dijkstra::traits::{ByKey, Compare, NaturalOrder};
//!
//! assert!(NaturalOrder.lt(&1, &2));
//! assert!(NaturalOrder.le(&2, &2));
//!
//! let distances = [4.0, 1.5, 3.0];
//! let by_distance = ByKey(|v: &usize| distances[*v]);
//! assert!(by_distance.lt(&1_usize, &2));
//!
//! let reversed = |a: &i32, b: &i32| a > b;
//! assert!(reversed.lt(&5, &3));
//! ```

/// A total preorder over `T`
///
/// Ties break however the implementation likes, as long as a single call is
/// stable. `le` defaults to `!lt(b, a)`.
pub trait Compare<T: ?Sized> {
    /// Returns true if `a` strictly precedes `b`
    fn lt(&self, a: &T, b: &T) -> bool;

    /// Returns true if `a` precedes or ties with `b`
    fn le(&self, a: &T, b: &T) -> bool {
        !self.lt(b, a)
    }
}

/// Any `Fn(&T, &T) -> bool` closure acts as a strict "less than"
impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn lt(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Orders elements by their own `PartialOrd`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: PartialOrd + ?Sized> Compare<T> for NaturalOrder {
    fn lt(&self, a: &T, b: &T) -> bool {
        a < b
    }

    fn le(&self, a: &T, b: &T) -> bool {
        a <= b
    }
}

/// Orders elements by a key extracted from each one
///
/// The key only needs `PartialOrd`, so `f64` distances work directly. A NaN
/// key compares as neither less nor equal and breaks the heap property, which
/// is why the traversal rejects non-finite weights.
#[derive(Debug, Clone, Copy)]
pub struct ByKey<F>(pub F);

impl<T: ?Sized, K: PartialOrd, F> Compare<T> for ByKey<F>
where
    F: Fn(&T) -> K,
{
    fn lt(&self, a: &T, b: &T) -> bool {
        (self.0)(a) < (self.0)(b)
    }

    fn le(&self, a: &T, b: &T) -> bool {
        (self.0)(a) <= (self.0)(b)
    }
}
