// Copyright (c) 2025 The flexalloc developers.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Search Frontier Queue
//!
//! An array-backed binary heap whose ordering is delegated to a
//! caller-supplied `Comparator`. The best-first engine keeps its open nodes
//! here and always expands the highest-ranked one.
//!
//! ## Highlights
//!
//! - `Comparator<N>`: `compare(a, b) -> Ordering` where `Greater` means `a`
//!   outranks `b` and is popped first.
//! - `push` appends and sifts up; `pop` moves the last element to the root
//!   and sifts down, returning `EmptyQueueError` on an empty queue.
//! - Sift-down prefers the left child on ties, so equal-ranked siblings are
//!   surfaced in a fixed order.
//! - `push_all` batches insertions; `clear` keeps the allocation.
//!
//! The heap invariant maintained throughout: no parent ranks strictly below
//! either of its children.

use std::cmp::Ordering;

/// Ranking strategy for queue entries.
/// `Ordering::Greater` means the first argument outranks the second
/// and is popped earlier.
pub trait Comparator<N> {
    fn compare(&self, a: &N, b: &N) -> Ordering;
}

/// Error returned when popping from an empty queue.
/// Popping an empty frontier is a control-flow bug in the caller, the
/// engine checks emptiness and treats it as exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyQueueError;

impl std::fmt::Display for EmptyQueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "called `PriorityQueue::pop` on an empty queue")
    }
}

impl std::error::Error for EmptyQueueError {}

/// An array-backed binary heap ordered by a `Comparator`.
#[derive(Debug, Clone)]
pub struct PriorityQueue<N, C> {
    items: Vec<N>,
    comparator: C,
}

impl<N, C> PriorityQueue<N, C>
where
    C: Comparator<N>,
{
    /// Creates a new empty queue with the given comparator.
    #[inline]
    pub fn new(comparator: C) -> Self {
        Self {
            items: Vec::new(),
            comparator,
        }
    }

    /// Creates a new empty queue with preallocated storage.
    #[inline]
    pub fn with_capacity(comparator: C, capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            comparator,
        }
    }

    /// Returns the number of entries in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the queue contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all entries, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns a reference to the highest-ranked entry, if any.
    #[inline]
    pub fn peek(&self) -> Option<&N> {
        self.items.first()
    }

    /// Inserts a single entry.
    #[inline]
    pub fn push(&mut self, node: N) {
        self.items.push(node);
        self.sift_up(self.items.len() - 1);
    }

    /// Inserts every entry from the iterator.
    #[inline]
    pub fn push_all<I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = N>,
    {
        for node in nodes {
            self.push(node);
        }
    }

    /// Removes and returns the highest-ranked entry.
    #[inline]
    pub fn pop(&mut self) -> Result<N, EmptyQueueError> {
        if self.items.is_empty() {
            return Err(EmptyQueueError);
        }

        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let best = match self.items.pop() {
            Some(node) => node,
            None => return Err(EmptyQueueError),
        };
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Ok(best)
    }

    #[inline]
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self
                .comparator
                .compare(&self.items[index], &self.items[parent])
                == Ordering::Greater
            {
                self.items.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    #[inline]
    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;

            // Left child wins ties, so the right child must strictly outrank it.
            let mut best_child = left;
            if right < len
                && self
                    .comparator
                    .compare(&self.items[right], &self.items[left])
                    == Ordering::Greater
            {
                best_child = right;
            }

            if self
                .comparator
                .compare(&self.items[best_child], &self.items[index])
                == Ordering::Greater
            {
                self.items.swap(best_child, index);
                index = best_child;
            } else {
                break;
            }
        }
    }

    /// Checks the heap invariant over the whole backing array.
    #[cfg(test)]
    fn is_heap(&self) -> bool {
        for index in 1..self.items.len() {
            let parent = (index - 1) / 2;
            if self
                .comparator
                .compare(&self.items[index], &self.items[parent])
                == Ordering::Greater
            {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{Comparator, EmptyQueueError, PriorityQueue};
    use std::cmp::Ordering;

    /// Ranks larger integers first.
    struct MaxFirst;

    impl Comparator<i64> for MaxFirst {
        fn compare(&self, a: &i64, b: &i64) -> Ordering {
            a.cmp(b)
        }
    }

    #[test]
    fn test_pop_on_empty_queue_fails() {
        let mut queue = PriorityQueue::new(MaxFirst);
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), Err(EmptyQueueError));
    }

    #[test]
    fn test_empty_queue_error_display() {
        assert_eq!(
            format!("{}", EmptyQueueError),
            "called `PriorityQueue::pop` on an empty queue"
        );
    }

    #[test]
    fn test_pop_returns_maximum_under_comparator() {
        let mut queue = PriorityQueue::new(MaxFirst);
        queue.push_all([3, 1, 4, 1, 5, 9, 2, 6]);

        assert_eq!(queue.len(), 8);
        assert_eq!(queue.peek(), Some(&9));

        let mut drained = Vec::new();
        while let Ok(node) = queue.pop() {
            drained.push(node);
        }
        assert_eq!(drained, vec![9, 6, 5, 4, 3, 2, 1, 1]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_heap_invariant_under_interleaved_pushes_and_pops() {
        let mut queue = PriorityQueue::new(MaxFirst);

        // Deterministic pseudo-random sequence via a small LCG.
        let mut state: u64 = 0x2545F491;
        let mut next = || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as i64
        };

        for round in 0..500 {
            if round % 3 == 2 && !queue.is_empty() {
                let top = *queue.peek().unwrap();
                let popped = queue.pop().unwrap();
                assert_eq!(popped, top);
            } else {
                queue.push(next() % 1000);
            }
            assert!(queue.is_heap(), "heap invariant violated at round {round}");
        }
    }

    #[test]
    fn test_clear_keeps_allocation_and_empties_queue() {
        let mut queue = PriorityQueue::with_capacity(MaxFirst, 16);
        queue.push_all([1, 2, 3]);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), Err(EmptyQueueError));
    }

    /// Ranks by the first tuple field only, leaving the second as a marker.
    struct FirstFieldMaxFirst;

    impl Comparator<(i64, usize)> for FirstFieldMaxFirst {
        fn compare(&self, a: &(i64, usize), b: &(i64, usize)) -> Ordering {
            a.0.cmp(&b.0)
        }
    }

    #[test]
    fn test_equal_ranked_entries_all_surface() {
        let mut queue = PriorityQueue::new(FirstFieldMaxFirst);
        queue.push_all([(5, 0), (5, 1), (5, 2), (3, 3)]);

        let mut markers = Vec::new();
        for _ in 0..3 {
            let (rank, marker) = queue.pop().unwrap();
            assert_eq!(rank, 5);
            markers.push(marker);
        }
        markers.sort_unstable();
        assert_eq!(markers, vec![0, 1, 2]);
        assert_eq!(queue.pop(), Ok((3, 3)));
    }
}
