//! Array-backed binary min-heap
//!
//! The vector is a complete binary tree laid out level by level:
//!
//! ```text
//! parent(i) = (i - 1) / 2
//! left(i)   = 2i + 1
//! right(i)  = 2i + 2
//! ```
//!
//! Every non-root element is greater than or equal to its parent, so the
//! minimum sits at index 0. Both repair walks are loops over indices.

use crate::{Error, Result};

/// A priority queue that always yields its smallest element first.
///
/// Unlike [`std::collections::BinaryHeap`] this is a min-heap and reports
/// empty-heap access as [`Error::EmptyContainer`].
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct BinaryMinHeap<T> {
    /// Elements in heap order
    data: Vec<T>,
}

impl<T> Default for BinaryMinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BinaryMinHeap<T> {
    /// Creates an empty heap
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates an empty heap with room for `capacity` elements
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { data: Vec::with_capacity(capacity) }
    }

    /// Returns the number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the heap holds no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the underlying array in heap order
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Drops every element
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T: Ord> BinaryMinHeap<T> {
    /// Adds `value`, moving it up until its parent is not greater.
    pub fn push(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len().saturating_sub(1));
    }

    /// Returns the smallest element without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the heap is empty.
    pub fn peek_min(&self) -> Result<&T> {
        self.data.first().ok_or(Error::EmptyContainer)
    }

    /// Removes and returns the smallest element.
    ///
    /// The root is swapped with the last element, the array shrinks by one,
    /// and the new root moves down until neither child is smaller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the heap is empty.
    pub fn pop_min(&mut self) -> Result<T> {
        if self.data.is_empty() {
            return Err(Error::EmptyContainer);
        }
        let last = self.data.len().saturating_sub(1);
        self.data.swap(0, last);
        let min = self.data.pop().ok_or(Error::EmptyContainer)?;
        self.sift_down(0);
        Ok(min)
    }

    /// Drains the heap into a vector in non-decreasing order
    #[must_use]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.data.len());
        while let Ok(value) = self.pop_min() {
            sorted.push(value);
        }
        sorted
    }

    /// Restores heap order upward from `index`
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = parent(index);
            match (self.data.get(index), self.data.get(parent)) {
                (Some(child), Some(above)) if child < above => {
                    self.data.swap(index, parent);
                    index = parent;
                }
                _ => break,
            }
        }
    }

    /// Restores heap order downward from `index`. A no-op past the last element.
    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = left(index);
            let right = right(index);
            let Some(left_value) = self.data.get(left) else {
                break;
            };

            // The right child is taken only when strictly smaller, so ties go left.
            let smaller = match self.data.get(right) {
                Some(right_value) if right_value < left_value => right,
                _ => left,
            };

            match (self.data.get(index), self.data.get(smaller)) {
                (Some(current), Some(child)) if current > child => {
                    self.data.swap(index, smaller);
                    index = smaller;
                }
                _ => break,
            }
        }
    }
}

impl<T: Ord> Extend<T> for BinaryMinHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for BinaryMinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

/// Index of the parent of `index`; the root is its own parent
const fn parent(index: usize) -> usize {
    index.saturating_sub(1) / 2
}

/// Index of the left child of `index`
const fn left(index: usize) -> usize {
    index.saturating_mul(2).saturating_add(1)
}

/// Index of the right child of `index`
const fn right(index: usize) -> usize {
    index.saturating_mul(2).saturating_add(2)
}
