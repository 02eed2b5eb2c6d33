//! Array-backed binary min-heap.
//!
//! Positions are 1-indexed in the heap arithmetic (parent of `k` is `k / 2`, children are
//! `2k` and `2k + 1`) and mapped onto a 0-indexed `Vec`. There is no decrease-key or
//! arbitrary removal: the engine leaves stale events in place and drops them on extraction.

use crate::error::{Error, Result};

/// Min-priority queue yielding its smallest element first.
#[derive(Debug, Clone)]
pub struct MinPq<T> {
    heap: Vec<T>,
}

impl<T> Default for MinPq<T> {
    fn default() -> Self {
        Self { heap: Vec::new() }
    }
}

impl<T: Ord> MinPq<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Number of elements the queue can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every queued element.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Add `item`, restoring heap order in O(log n).
    pub fn insert(&mut self, item: T) {
        self.heap.push(item);
        self.swim(self.heap.len());
    }

    /// Smallest element without removing it.
    #[inline]
    pub fn peek_min(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Remove and return the smallest element.
    ///
    /// Errors:
    /// - `Error::EmptyQueue` if there is nothing to extract.
    pub fn extract_min(&mut self) -> Result<T> {
        let n = self.heap.len();
        if n == 0 {
            return Err(Error::EmptyQueue);
        }
        self.exch(1, n);
        let min = self.heap.pop().ok_or(Error::EmptyQueue)?;
        self.sink(1);
        Ok(min)
    }

    // ============ Heap helpers (1-indexed) ============

    #[inline]
    fn less(&self, i: usize, j: usize) -> bool {
        self.heap[i - 1] < self.heap[j - 1]
    }

    #[inline]
    fn exch(&mut self, i: usize, j: usize) {
        self.heap.swap(i - 1, j - 1);
    }

    fn swim(&mut self, mut k: usize) {
        while k > 1 && self.less(k, k / 2) {
            self.exch(k, k / 2);
            k /= 2;
        }
    }

    fn sink(&mut self, mut k: usize) {
        let n = self.heap.len();
        while 2 * k <= n {
            let mut j = 2 * k;
            // Right child only wins when strictly smaller.
            if j < n && self.less(j + 1, j) {
                j += 1;
            }
            if !self.less(j, k) {
                break;
            }
            self.exch(k, j);
            k = j;
        }
    }
}
