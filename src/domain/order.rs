//! Injected total orders.
//!
//! Every ordered structure in the crate (heap, expansion engine, priority search)
//! takes its notion of "less" and "better" from a [`TotalOrder`] value rather than
//! from ambient `Ord` resolution, so a domain can rank values by a derived key
//! without wrapping them in newtypes.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// A total order over `T`.
///
/// Implementations must be consistent: antisymmetric, transitive and total.
/// Tie handling elsewhere in the crate ("first seen wins") assumes it.
pub trait TotalOrder<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// `a` ranks strictly above `b`.
    fn is_better(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    /// Keeps whichever of the two ranks higher; on a tie keeps `current`.
    fn better_of<'a>(&self, current: &'a T, candidate: &'a T) -> &'a T {
        if self.is_better(candidate, current) {
            candidate
        } else {
            current
        }
    }
}

/// The natural order of `T: Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> TotalOrder<T> for Natural {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts another order. Turns the min-heap into a max-heap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<O>(pub O);

impl<T: ?Sized, O: TotalOrder<T>> TotalOrder<T> for Reversed<O> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Orders values by a derived key.
pub struct ByKey<T, K, F>
where
    F: Fn(&T) -> K,
{
    key: F,
    _marker: PhantomData<fn(&T) -> K>,
}

impl<T, K, F> ByKey<T, K, F>
where
    F: Fn(&T) -> K,
{
    pub fn new(key: F) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }
}

impl<T, K, F> Clone for ByKey<T, K, F>
where
    F: Fn(&T) -> K + Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.key.clone())
    }
}

impl<T, K, F> fmt::Debug for ByKey<T, K, F>
where
    F: Fn(&T) -> K,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ByKey")
    }
}

impl<T, K: Ord, F> TotalOrder<T> for ByKey<T, K, F>
where
    F: Fn(&T) -> K,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.key)(a).cmp(&(self.key)(b))
    }
}

impl<T: ?Sized, O: TotalOrder<T> + ?Sized> TotalOrder<T> for &O {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (**self).compare(a, b)
    }
}
