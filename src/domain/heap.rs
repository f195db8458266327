//! Array-backed binary min-heap with copy-on-write storage.
//!
//! The slot array sits behind an `Rc`. A heap that is the sole owner of its
//! array is updated in place; a heap whose array is shared with a clone copies
//! it on the first write. The same type therefore serves as an ephemeral
//! priority queue (`push`/`pop`) and as a persistent value (`insert` and
//! `delete_min` consume the heap and hand back the next version, and any
//! earlier clone keeps seeing its own contents).

use std::cmp::Ordering;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::domain::error::ContractViolation;
use crate::domain::order::{Natural, TotalOrder};

/// Growth policy of the slot array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeapConfig {
    /// Slots allocated on the first insert.
    pub initial_capacity: usize,
    /// Below this capacity the array doubles; at or above it, grows by half
    /// (at least one slot).
    pub growth_threshold: usize,
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            growth_threshold: 1 << 16,
        }
    }
}

impl HeapConfig {
    /// Capacity following `current` on overflow. Always larger than `current`.
    pub fn next_capacity(&self, current: usize) -> usize {
        if current == 0 {
            self.initial_capacity.max(1)
        } else if current < self.growth_threshold {
            current * 2
        } else {
            current + (current / 2).max(1)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Heap<T, O = Natural> {
    /// `len() == capacity`; `Some` exactly on `[0, size)`.
    slots: Rc<Vec<Option<T>>>,
    size: usize,
    order: O,
    config: HeapConfig,
}

impl<T: Clone + Ord> Heap<T, Natural> {
    pub fn new() -> Self {
        Self::with_order(Natural)
    }
}

impl<T: Clone + Ord> Default for Heap<T, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, O: TotalOrder<T>> Heap<T, O> {
    pub fn with_order(order: O) -> Self {
        Self::with_config(order, HeapConfig::default())
    }

    pub fn with_config(order: O, config: HeapConfig) -> Self {
        Self {
            slots: Rc::new(Vec::new()),
            size: 0,
            order,
            config,
        }
    }

    /// A heap seeded with one element.
    pub fn singleton(value: T, order: O) -> Self {
        Self::with_order(order).insert(value)
    }

    pub fn from_values(values: impl IntoIterator<Item = T>, order: O) -> Self {
        let mut heap = Self::with_order(order);
        for value in values {
            heap.push(value);
        }
        heap
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn order(&self) -> &O {
        &self.order
    }

    /// The minimum, without removing it.
    pub fn peek(&self) -> Option<&T> {
        if self.size == 0 {
            return None;
        }
        self.slots.first().and_then(Option::as_ref)
    }

    /// Persistent insert: consumes this version, returns the next one.
    #[must_use]
    pub fn insert(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    /// Persistent delete-min. On an empty heap returns `(None, self)`.
    #[must_use]
    pub fn delete_min(mut self) -> (Option<T>, Self) {
        let min = self.pop();
        (min, self)
    }

    /// In-place insert.
    pub fn push(&mut self, value: T) {
        if self.size == self.slots.len() {
            self.grow();
        }
        let order = &self.order;
        let slots = Rc::make_mut(&mut self.slots);
        let index = self.size;
        slots[index] = Some(value);
        sift_up(slots, order, index);
        self.size += 1;
    }

    /// In-place delete-min.
    pub fn pop(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }
        let order = &self.order;
        let slots = Rc::make_mut(&mut self.slots);
        let last = self.size - 1;
        slots.swap(0, last);
        let min = slots[last].take();
        self.size = last;
        sift_down(slots, order, 0, last);
        debug_assert!(slots.get(self.size).map_or(true, Option::is_none));
        min
    }

    fn grow(&mut self) {
        let capacity = self.config.next_capacity(self.slots.len());
        Rc::make_mut(&mut self.slots).resize_with(capacity, || None);
    }

    /// Full consistency check: occupancy of every slot and the heap order.
    pub fn validate(&self) -> Result<(), ContractViolation> {
        let size = self.size;
        if size > self.slots.len() {
            return Err(ContractViolation::HeapInvariant {
                index: size,
                size,
                reason: format!("size exceeds capacity {}", self.slots.len()),
            });
        }
        for (index, slot) in self.slots.iter().enumerate() {
            match (index < size, slot) {
                (true, None) => {
                    return Err(ContractViolation::HeapInvariant {
                        index,
                        size,
                        reason: "empty slot below size".to_string(),
                    })
                }
                (false, Some(_)) => {
                    return Err(ContractViolation::HeapInvariant {
                        index,
                        size,
                        reason: "occupied slot at or after size".to_string(),
                    })
                }
                _ => {}
            }
        }
        for index in 1..size {
            if less(&self.slots, &self.order, index, (index - 1) / 2) {
                return Err(ContractViolation::HeapInvariant {
                    index,
                    size,
                    reason: "element orders before its parent".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Drains the heap in ascending order.
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }
}

/// Ascending drain by repeated delete-min.
pub struct IntoIter<T, O> {
    heap: Heap<T, O>,
}

impl<T: Clone, O: TotalOrder<T>> Iterator for IntoIter<T, O> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<T: Clone, O: TotalOrder<T>> IntoIterator for Heap<T, O> {
    type Item = T;
    type IntoIter = IntoIter<T, O>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { heap: self }
    }
}

impl<T: Clone + Ord> FromIterator<T> for Heap<T, Natural> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter, Natural)
    }
}

fn less<T, O: TotalOrder<T>>(slots: &[Option<T>], order: &O, i: usize, j: usize) -> bool {
    match (&slots[i], &slots[j]) {
        (Some(a), Some(b)) => order.compare(a, b) == Ordering::Less,
        _ => false,
    }
}

fn sift_up<T, O: TotalOrder<T>>(slots: &mut [Option<T>], order: &O, mut index: usize) {
    while index > 0 {
        let parent = (index - 1) / 2;
        if !less(slots, order, index, parent) {
            break;
        }
        slots.swap(index, parent);
        index = parent;
    }
}

fn sift_down<T, O: TotalOrder<T>>(slots: &mut [Option<T>], order: &O, mut index: usize, size: usize) {
    loop {
        let left = 2 * index + 1;
        if left >= size {
            break;
        }
        let right = left + 1;
        let smaller = if right < size && less(slots, order, right, left) {
            right
        } else {
            left
        };
        if !less(slots, order, smaller, index) {
            break;
        }
        slots.swap(index, smaller);
        index = smaller;
    }
}
