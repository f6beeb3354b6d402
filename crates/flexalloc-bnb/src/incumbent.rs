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

//! Incumbent storage strategies for the search session.
//!
//! A single-threaded run keeps its best value in a local variable; a
//! portfolio run additionally publishes improvements to a `SharedIncumbent`
//! and pulls tighter values found by sibling solvers. `IncumbentStore`
//! abstracts over the two so the session logic stays identical.

use flexalloc_model::solution::Solution;
use flexalloc_search::{incumbent::SharedIncumbent, num::SolverNumeric};

/// Storage strategy for the best total value seen so far.
///
/// Values are maximised. `tighten` may only ever raise the local best.
pub trait IncumbentStore<T>
where
    T: SolverNumeric,
{
    /// The value searches start from before any solution is known.
    fn initial_best(&self) -> T;

    /// Combines the local best with any externally published value and
    /// returns the tighter (larger) of the two.
    fn tighten(&self, local_best: T) -> T;

    /// Called when the session finds a solution strictly better than its
    /// local best.
    fn on_solution_found(&self, solution: &Solution<T>);
}

/// A store for runs without a shared incumbent. Purely local.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSharedIncumbent;

impl<T> IncumbentStore<T> for NoSharedIncumbent
where
    T: SolverNumeric,
{
    #[inline]
    fn initial_best(&self) -> T {
        T::min_value()
    }

    #[inline]
    fn tighten(&self, local_best: T) -> T {
        local_best
    }

    #[inline]
    fn on_solution_found(&self, _solution: &Solution<T>) {}
}

/// Bridges the session to a `SharedIncumbent` shared across portfolio
/// threads.
#[derive(Debug)]
pub struct SharedIncumbentAdapter<'a, T> {
    inner: &'a SharedIncumbent<T>,
}

impl<'a, T> SharedIncumbentAdapter<'a, T> {
    #[inline]
    pub fn new(inner: &'a SharedIncumbent<T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> IncumbentStore<T> for SharedIncumbentAdapter<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    fn initial_best(&self) -> T {
        self.tighten(T::min_value())
    }

    #[inline]
    fn tighten(&self, local_best: T) -> T {
        // The shared value is stored widened to i64; the sentinel i64::MIN
        // and any value outside T's range fall back to T's minimum, which
        // never loosens the local best.
        let shared = T::from_i64(self.inner.best_value()).unwrap_or_else(T::min_value);
        local_best.max(shared)
    }

    #[inline]
    fn on_solution_found(&self, solution: &Solution<T>) {
        self.inner.try_install(solution);
    }
}

#[cfg(test)]
mod tests {
    use super::{IncumbentStore, NoSharedIncumbent, SharedIncumbentAdapter};
    use flexalloc_model::solution::Solution;
    use flexalloc_search::incumbent::SharedIncumbent;

    type IntegerType = i64;

    fn solution_with_value(value: IntegerType) -> Solution<IntegerType> {
        Solution::new(value, vec![], vec![], vec![], vec![], vec![])
    }

    #[test]
    fn test_no_shared_incumbent_is_local_only() {
        let store = NoSharedIncumbent;
        assert_eq!(
            IncumbentStore::<IntegerType>::initial_best(&store),
            IntegerType::MIN
        );
        assert_eq!(store.tighten(42), 42);
        store.on_solution_found(&solution_with_value(42));
        assert_eq!(store.tighten(42), 42);
    }

    #[test]
    fn test_adapter_starts_from_shared_value() {
        let shared = SharedIncumbent::<IntegerType>::new();
        shared.try_install(&solution_with_value(10));

        let store = SharedIncumbentAdapter::new(&shared);
        assert_eq!(store.initial_best(), 10);
    }

    #[test]
    fn test_adapter_tighten_takes_maximum() {
        let shared = SharedIncumbent::<IntegerType>::new();
        let store = SharedIncumbentAdapter::new(&shared);

        // Nothing published yet; the local best stands.
        assert_eq!(store.tighten(5), 5);

        shared.try_install(&solution_with_value(12));
        assert_eq!(store.tighten(5), 12);
        assert_eq!(store.tighten(20), 20);
    }

    #[test]
    fn test_adapter_publishes_solutions() {
        let shared = SharedIncumbent::<IntegerType>::new();
        let store = SharedIncumbentAdapter::new(&shared);

        store.on_solution_found(&solution_with_value(7));
        assert_eq!(shared.best_value(), 7);
        assert!(shared.snapshot().is_some());
    }

    #[test]
    fn test_adapter_with_narrow_type() {
        let shared = SharedIncumbent::<i16>::new();
        let store = SharedIncumbentAdapter::new(&shared);

        assert_eq!(store.initial_best(), i16::MIN);
        shared.try_install(&Solution::new(3i16, vec![], vec![], vec![], vec![], vec![]));
        assert_eq!(store.tighten(i16::MIN), 3);
    }
}
