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

//! Counters collected during a branch and bound run.

use std::time::Duration;

/// Statistics of a single branch and bound search.
///
/// Counters saturate instead of wrapping. The root bound is recorded once
/// when the root node is evaluated and stays `None` on empty models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverStatistics<T> {
    nodes_explored: u64,
    children_enqueued: u64,
    max_depth: usize,
    prunings_infeasible: u64,
    prunings_bound: u64,
    solutions_found: u64,
    time_total: Duration,
    root_bound: Option<T>,
}

impl<T> Default for BnbSolverStatistics<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BnbSolverStatistics<T> {
    pub fn new() -> Self {
        Self {
            nodes_explored: 0,
            children_enqueued: 0,
            max_depth: 0,
            prunings_infeasible: 0,
            prunings_bound: 0,
            solutions_found: 0,
            time_total: Duration::ZERO,
            root_bound: None,
        }
    }

    /// The number of frontier nodes popped and processed.
    #[inline]
    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }

    /// The number of child nodes pushed onto the frontier.
    #[inline]
    pub fn children_enqueued(&self) -> u64 {
        self.children_enqueued
    }

    /// The deepest node depth processed so far.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Children discarded because a (job, server) pair was infeasible.
    #[inline]
    pub fn prunings_infeasible(&self) -> u64 {
        self.prunings_infeasible
    }

    /// Nodes discarded because their bound could not beat the incumbent.
    #[inline]
    pub fn prunings_bound(&self) -> u64 {
        self.prunings_bound
    }

    /// Complete solutions that improved the local best.
    #[inline]
    pub fn solutions_found(&self) -> u64 {
        self.solutions_found
    }

    /// Wall clock time of the whole run.
    #[inline]
    pub fn time_total(&self) -> Duration {
        self.time_total
    }

    /// The relaxation bound of the root node, if one was evaluated.
    #[inline]
    pub fn root_bound(&self) -> Option<&T> {
        self.root_bound.as_ref()
    }

    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_children_enqueued(&mut self, count: u64) {
        self.children_enqueued = self.children_enqueued.saturating_add(count);
    }

    #[inline]
    pub fn on_depth_reached(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, time: Duration) {
        self.time_total = time;
    }

    #[inline]
    pub fn set_root_bound(&mut self, bound: T) {
        self.root_bound = Some(bound);
    }
}

impl<T> std::fmt::Display for BnbSolverStatistics<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Flexalloc-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes explored: {}", self.nodes_explored)?;
        writeln!(f, "  Children enqueued: {}", self.children_enqueued)?;
        writeln!(f, "  Max depth: {}", self.max_depth)?;
        writeln!(f, "  Prunings (infeasible): {}", self.prunings_infeasible)?;
        writeln!(f, "  Prunings (bound): {}", self.prunings_bound)?;
        writeln!(f, "  Solutions found: {}", self.solutions_found)?;
        match &self.root_bound {
            Some(bound) => writeln!(f, "  Root bound: {}", bound)?,
            None => writeln!(f, "  Root bound: -")?,
        }
        write!(f, "  Total time: {:?}", self.time_total)
    }
}

#[cfg(test)]
mod tests {
    use super::BnbSolverStatistics;
    use std::time::Duration;

    type IntegerType = i64;

    #[test]
    fn test_new_statistics_are_zeroed() {
        let stats = BnbSolverStatistics::<IntegerType>::new();
        assert_eq!(stats.nodes_explored(), 0);
        assert_eq!(stats.children_enqueued(), 0);
        assert_eq!(stats.max_depth(), 0);
        assert_eq!(stats.prunings_infeasible(), 0);
        assert_eq!(stats.prunings_bound(), 0);
        assert_eq!(stats.solutions_found(), 0);
        assert_eq!(stats.time_total(), Duration::ZERO);
        assert!(stats.root_bound().is_none());
    }

    #[test]
    fn test_hooks_update_counters() {
        let mut stats = BnbSolverStatistics::<IntegerType>::new();
        stats.on_node_explored();
        stats.on_node_explored();
        stats.on_children_enqueued(3);
        stats.on_depth_reached(5);
        stats.on_depth_reached(2);
        stats.on_pruning_infeasible();
        stats.on_pruning_bound();
        stats.on_solution_found();
        stats.set_root_bound(17);
        stats.set_total_time(Duration::from_millis(10));

        assert_eq!(stats.nodes_explored(), 2);
        assert_eq!(stats.children_enqueued(), 3);
        assert_eq!(stats.max_depth(), 5);
        assert_eq!(stats.prunings_infeasible(), 1);
        assert_eq!(stats.prunings_bound(), 1);
        assert_eq!(stats.solutions_found(), 1);
        assert_eq!(stats.root_bound(), Some(&17));
        assert_eq!(stats.time_total(), Duration::from_millis(10));
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = BnbSolverStatistics::<IntegerType>::new();
        stats.on_children_enqueued(u64::MAX);
        stats.on_children_enqueued(1);
        assert_eq!(stats.children_enqueued(), u64::MAX);
    }

    #[test]
    fn test_display_contains_counters() {
        let mut stats = BnbSolverStatistics::<IntegerType>::new();
        stats.on_node_explored();
        stats.set_root_bound(42);
        let rendered = format!("{}", stats);
        assert!(rendered.contains("Flexalloc-BnB Solver Statistics:"));
        assert!(rendered.contains("Nodes explored: 1"));
        assert!(rendered.contains("Root bound: 42"));
    }
}
