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

//! # Search Nodes
//!
//! A `SearchNode` freezes one partial allocation: the ledger snapshot, the
//! depth (jobs decided so far), the accumulated value, the optimistic bound
//! and a monotone sequence id used for deterministic tie-breaking.
//!
//! The default `BoundComparator` ranks nodes by bound descending, then depth
//! descending (deeper nodes reach leaves sooner), then sequence ascending
//! (older nodes win ties).

use crate::queue::Comparator;
use flexalloc_model::ledger::AllocationLedger;
use num_traits::{PrimInt, Signed};
use std::cmp::Ordering;

/// One open node of the search frontier.
#[derive(Debug, Clone)]
pub struct SearchNode<T> {
    /// Ledger snapshot with the first `depth` jobs decided.
    pub ledger: AllocationLedger<T>,
    /// Number of jobs decided so far; the node branches on job `depth`.
    pub depth: usize,
    /// Value accumulated by the decided jobs.
    pub value: T,
    /// Optimistic bound on the total value reachable from this node.
    pub bound: T,
    /// Monotone id assigned at creation. Smaller means created earlier.
    pub sequence: u64,
}

impl<T> std::fmt::Display for SearchNode<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchNode(depth: {}, value: {}, bound: {}, sequence: {})",
            self.depth, self.value, self.bound, self.sequence
        )
    }
}

/// Best-first ordering: bound descending, depth descending, sequence
/// ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundComparator;

impl<T> Comparator<SearchNode<T>> for BoundComparator
where
    T: PrimInt + Signed,
{
    #[inline]
    fn compare(&self, a: &SearchNode<T>, b: &SearchNode<T>) -> Ordering {
        a.bound
            .cmp(&b.bound)
            .then_with(|| a.depth.cmp(&b.depth))
            .then_with(|| b.sequence.cmp(&a.sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundComparator, SearchNode};
    use crate::queue::{Comparator, PriorityQueue};
    use flexalloc_model::{ledger::AllocationLedger, model::ModelBuilder};
    use std::cmp::Ordering;

    type IntegerType = i64;

    fn node(depth: usize, value: i64, bound: i64, sequence: u64) -> SearchNode<IntegerType> {
        let model = ModelBuilder::<IntegerType>::new(1, 1).build();
        SearchNode {
            ledger: AllocationLedger::new(&model),
            depth,
            value,
            bound,
            sequence,
        }
    }

    #[test]
    fn test_higher_bound_outranks() {
        let cmp = BoundComparator;
        let a = node(0, 0, 10, 0);
        let b = node(0, 0, 7, 1);
        assert_eq!(cmp.compare(&a, &b), Ordering::Greater);
        assert_eq!(cmp.compare(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_equal_bound_prefers_deeper_node() {
        let cmp = BoundComparator;
        let shallow = node(1, 0, 10, 0);
        let deep = node(3, 0, 10, 1);
        assert_eq!(cmp.compare(&deep, &shallow), Ordering::Greater);
    }

    #[test]
    fn test_equal_bound_and_depth_prefers_older_node() {
        let cmp = BoundComparator;
        let older = node(2, 0, 10, 5);
        let newer = node(2, 0, 10, 9);
        assert_eq!(cmp.compare(&older, &newer), Ordering::Greater);
        assert_eq!(cmp.compare(&newer, &older), Ordering::Less);
        assert_eq!(cmp.compare(&older, &older), Ordering::Equal);
    }

    #[test]
    fn test_queue_pops_best_bound_first() {
        let mut queue = PriorityQueue::new(BoundComparator);
        queue.push_all([
            node(0, 0, 4, 0),
            node(0, 0, 9, 1),
            node(0, 0, 6, 2),
            node(0, 0, 9, 3),
        ]);

        let first = queue.pop().unwrap();
        assert_eq!(first.bound, 9);
        assert_eq!(first.sequence, 1); // older of the two bound-9 nodes

        let second = queue.pop().unwrap();
        assert_eq!(second.bound, 9);
        assert_eq!(second.sequence, 3);

        assert_eq!(queue.pop().unwrap().bound, 6);
        assert_eq!(queue.pop().unwrap().bound, 4);
    }
}
