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

//! # Tree Search Monitor
//!
//! The branch and bound engine exposes a richer set of callbacks than the
//! generic `SearchMonitor`: it reports node expansions, computed bounds,
//! prunings and enqueued children. All hooks receive the current run
//! statistics, and `search_command` lets a monitor terminate the search
//! cooperatively between node expansions.
//!
//! Every hook has a no-op default so monitors only implement what they
//! observe.

use crate::stats::BnbSolverStatistics;
use flexalloc_model::{model::Model, solution::Solution};
use flexalloc_search::{monitor::search_monitor::SearchCommand, num::SolverNumeric};

/// Why the engine discarded a node or a candidate child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneReason {
    /// The (job, server) pair admits no deadline-meeting speed triple.
    Infeasible,
    /// The node's relaxation bound cannot beat the incumbent.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// Observer of a branch and bound tree search.
#[allow(unused_variables)]
pub trait TreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    /// Returns the name of the search monitor.
    fn name(&self) -> &str;

    /// Called once before the root node is enqueued.
    fn on_enter_search(&mut self, model: &Model<T>, statistics: &BnbSolverStatistics<T>) {}

    /// Called once after the search loop ends, for any reason.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {}

    /// Polled between node expansions. Returning `Terminate` aborts the run.
    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        SearchCommand::Continue
    }

    /// Called for every node popped off the frontier.
    fn on_step(&mut self, statistics: &BnbSolverStatistics<T>) {}

    /// Called when a node at `depth` with accumulated `value` is expanded.
    fn on_descend(&mut self, depth: usize, value: T, statistics: &BnbSolverStatistics<T>) {}

    /// Called after the relaxation oracle evaluated a child's bound.
    fn on_bound_computed(&mut self, bound: T, statistics: &BnbSolverStatistics<T>) {}

    /// Called when a node or candidate child is discarded.
    fn on_prune(&mut self, reason: PruneReason, statistics: &BnbSolverStatistics<T>) {}

    /// Called after a node's surviving children were pushed to the frontier.
    fn on_children_enqueued(&mut self, count: usize, statistics: &BnbSolverStatistics<T>) {}

    /// Called when a complete solution improves the local best.
    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics<T>) {}
}

impl<T> std::fmt::Debug for dyn TreeSearchMonitor<T> + '_
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn TreeSearchMonitor<T> + '_
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::{PruneReason, TreeSearchMonitor};
    use crate::stats::BnbSolverStatistics;
    use flexalloc_search::monitor::search_monitor::SearchCommand;

    type IntegerType = i64;

    struct MinimalMonitor;

    impl TreeSearchMonitor<IntegerType> for MinimalMonitor {
        fn name(&self) -> &str {
            "MinimalMonitor"
        }
    }

    #[test]
    fn test_default_command_is_continue() {
        let mut monitor = MinimalMonitor;
        let stats = BnbSolverStatistics::new();
        assert_eq!(monitor.search_command(&stats), SearchCommand::Continue);
    }

    #[test]
    fn test_prune_reason_display() {
        assert_eq!(format!("{}", PruneReason::Infeasible), "Infeasible");
        assert_eq!(format!("{}", PruneReason::BoundDominated), "BoundDominated");
    }

    #[test]
    fn test_dyn_debug_uses_name() {
        let monitor = MinimalMonitor;
        let dynamic: &dyn TreeSearchMonitor<IntegerType> = &monitor;
        assert_eq!(format!("{:?}", dynamic), "TreeSearchMonitor(MinimalMonitor)");
    }
}
