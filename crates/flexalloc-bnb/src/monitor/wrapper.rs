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

//! Lifts a generic `SearchMonitor` into the tree search callback set.
//!
//! The portfolio hands each strategy a search-level monitor; the branch and
//! bound engine only speaks `TreeSearchMonitor`. The wrapper forwards the
//! shared callbacks and ignores the tree-specific ones.

use crate::{monitor::tree_search_monitor::TreeSearchMonitor, stats::BnbSolverStatistics};
use flexalloc_model::{model::Model, solution::Solution};
use flexalloc_search::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    num::SolverNumeric,
};

pub struct WrapperMonitor<'a, T> {
    inner: &'a mut dyn SearchMonitor<T>,
}

impl<'a, T> WrapperMonitor<'a, T> {
    #[inline]
    pub fn new(inner: &'a mut dyn SearchMonitor<T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> TreeSearchMonitor<T> for WrapperMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "WrapperMonitor"
    }

    fn on_enter_search(&mut self, model: &Model<T>, _statistics: &BnbSolverStatistics<T>) {
        self.inner.on_enter_search(model);
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {
        self.inner.on_exit_search();
    }

    fn search_command(&mut self, _statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        self.inner.search_command()
    }

    fn on_step(&mut self, _statistics: &BnbSolverStatistics<T>) {
        self.inner.on_step();
    }

    fn on_solution_found(&mut self, solution: &Solution<T>, _statistics: &BnbSolverStatistics<T>) {
        self.inner.on_solution_found(solution);
    }
}

#[cfg(test)]
mod tests {
    use super::WrapperMonitor;
    use crate::{monitor::tree_search_monitor::TreeSearchMonitor, stats::BnbSolverStatistics};
    use flexalloc_search::monitor::{
        interrupt::InterruptMonitor,
        search_monitor::{SearchCommand, SearchMonitor},
    };
    use std::sync::atomic::{AtomicBool, Ordering};

    type IntegerType = i64;

    struct CountingMonitor {
        steps: usize,
    }

    impl SearchMonitor<IntegerType> for CountingMonitor {
        fn name(&self) -> &str {
            "CountingMonitor"
        }

        fn on_enter_search(&mut self, _model: &flexalloc_model::model::Model<IntegerType>) {}

        fn on_exit_search(&mut self) {}

        fn on_solution_found(&mut self, _solution: &flexalloc_model::solution::Solution<IntegerType>) {
        }

        fn on_step(&mut self) {
            self.steps += 1;
        }

        fn search_command(&self) -> SearchCommand {
            SearchCommand::Continue
        }
    }

    #[test]
    fn test_forwards_steps_and_command() {
        let mut inner = CountingMonitor { steps: 0 };
        let stats = BnbSolverStatistics::<IntegerType>::new();
        {
            let mut wrapper = WrapperMonitor::new(&mut inner);
            wrapper.on_step(&stats);
            wrapper.on_step(&stats);
            assert_eq!(wrapper.search_command(&stats), SearchCommand::Continue);
        }
        assert_eq!(inner.steps, 2);
    }

    #[test]
    fn test_forwards_interrupt_termination() {
        let stop = AtomicBool::new(false);
        let mut inner = InterruptMonitor::<IntegerType>::new(&stop);
        let stats = BnbSolverStatistics::<IntegerType>::new();
        let mut wrapper = WrapperMonitor::new(&mut inner);

        assert_eq!(wrapper.search_command(&stats), SearchCommand::Continue);
        stop.store(true, Ordering::Relaxed);
        assert!(matches!(
            wrapper.search_command(&stats),
            SearchCommand::Terminate(_)
        ));
    }
}
