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

//! Fans every tree search callback out to a list of child monitors.
//! The first `Terminate` returned by any child wins.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    stats::BnbSolverStatistics,
};
use flexalloc_model::{model::Model, solution::Solution};
use flexalloc_search::{monitor::search_monitor::SearchCommand, num::SolverNumeric};

pub struct CompositeTreeMonitor<'a, T> {
    monitors: Vec<Box<dyn TreeSearchMonitor<T> + 'a>>,
}

impl<'a, T> CompositeTreeMonitor<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> Default for CompositeTreeMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> TreeSearchMonitor<T> for CompositeTreeMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "CompositeTreeMonitor"
    }

    fn on_enter_search(&mut self, model: &Model<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_enter_search(model, statistics);
        }
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_exit_search(statistics);
        }
    }

    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        for monitor in self.monitors.iter_mut() {
            if let SearchCommand::Terminate(reason) = monitor.search_command(statistics) {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }

    fn on_step(&mut self, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_step(statistics);
        }
    }

    fn on_descend(&mut self, depth: usize, value: T, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_descend(depth, value, statistics);
        }
    }

    fn on_bound_computed(&mut self, bound: T, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_bound_computed(bound, statistics);
        }
    }

    fn on_prune(&mut self, reason: PruneReason, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_prune(reason, statistics);
        }
    }

    fn on_children_enqueued(&mut self, count: usize, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_children_enqueued(count, statistics);
        }
    }

    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_solution_found(solution, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CompositeTreeMonitor;
    use crate::{
        monitor::{no_op::NoOperationMonitor, tree_search_monitor::TreeSearchMonitor},
        stats::BnbSolverStatistics,
    };
    use flexalloc_search::monitor::search_monitor::SearchCommand;

    type IntegerType = i64;

    struct FixedCommandMonitor {
        command: SearchCommand,
        steps_seen: usize,
    }

    impl FixedCommandMonitor {
        fn new(command: SearchCommand) -> Self {
            Self {
                command,
                steps_seen: 0,
            }
        }
    }

    impl TreeSearchMonitor<IntegerType> for FixedCommandMonitor {
        fn name(&self) -> &str {
            "FixedCommandMonitor"
        }

        fn search_command(
            &mut self,
            _statistics: &BnbSolverStatistics<IntegerType>,
        ) -> SearchCommand {
            self.command.clone()
        }

        fn on_step(&mut self, _statistics: &BnbSolverStatistics<IntegerType>) {
            self.steps_seen += 1;
        }
    }

    #[test]
    fn test_empty_composite_continues() {
        let mut composite = CompositeTreeMonitor::<IntegerType>::new();
        assert!(composite.is_empty());
        assert_eq!(
            composite.search_command(&BnbSolverStatistics::new()),
            SearchCommand::Continue
        );
    }

    #[test]
    fn test_first_terminate_wins() {
        let mut composite = CompositeTreeMonitor::<IntegerType>::with_capacity(3);
        composite.add_monitor(NoOperationMonitor::new());
        composite.add_monitor(FixedCommandMonitor::new(SearchCommand::Terminate(
            "first".into(),
        )));
        composite.add_monitor(FixedCommandMonitor::new(SearchCommand::Terminate(
            "second".into(),
        )));
        assert_eq!(composite.len(), 3);

        assert_eq!(
            composite.search_command(&BnbSolverStatistics::new()),
            SearchCommand::Terminate("first".into())
        );
    }

    #[test]
    fn test_callbacks_fan_out() {
        let mut composite = CompositeTreeMonitor::<IntegerType>::new();
        composite.add_monitor_boxed(Box::new(FixedCommandMonitor::new(SearchCommand::Continue)));

        let stats = BnbSolverStatistics::new();
        composite.on_step(&stats);
        composite.on_step(&stats);
        composite.on_descend(1, 5, &stats);
        composite.on_bound_computed(9, &stats);
        composite.on_children_enqueued(2, &stats);
        // Fan-out is observable through the command of the single child.
        assert_eq!(composite.search_command(&stats), SearchCommand::Continue);
    }
}
