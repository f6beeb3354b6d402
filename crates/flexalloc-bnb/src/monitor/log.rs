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

//! Periodic progress table for long-running searches. Prints one line per
//! `log_interval`, rate-limited by a bitmask filter on the node counter so
//! that the clock is not consulted every expansion.

use crate::{
    monitor::tree_search_monitor::TreeSearchMonitor,
    stats::BnbSolverStatistics,
};
use flexalloc_model::{model::Model, solution::Solution};
use flexalloc_search::num::SolverNumeric;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_value: Option<T>,
}

impl<T> LogMonitor<T>
where
    T: SolverNumeric,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_value: None,
        }
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<14} | {:<7} | {:<12} | {:<13} | {:<16} | {:<14}",
            "Elapsed",
            "Nodes",
            "Depth",
            "Best Value",
            "Node Value",
            "Pruned (Bound)",
            "Pruned (Inf.)"
        );
        println!("{}", "-".repeat(102));
    }

    #[inline(always)]
    fn log_line(&mut self, depth: usize, value: T, stats: &BnbSolverStatistics<T>) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best_value_str = match &self.best_value {
            Some(best) => format!("{}", best),
            None => "-".to_string(),
        };
        let elapsed_field = format!("{:.1}s", elapsed);

        println!(
            "{:<9} | {:<14} | {:<7} | {:<12} | {:<13} | {:<16} | {:<14}",
            elapsed_field,
            stats.nodes_explored(),
            depth,
            best_value_str,
            value,
            stats.prunings_bound(),
            stats.prunings_infeasible()
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogMonitor<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, _model: &Model<T>, _statistics: &BnbSolverStatistics<T>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_value = None; // Reset
        self.print_header();
    }

    fn on_descend(&mut self, depth: usize, value: T, statistics: &BnbSolverStatistics<T>) {
        if (statistics.nodes_explored() & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(depth, value, statistics);
        }
    }

    fn on_solution_found(&mut self, solution: &Solution<T>, _statistics: &BnbSolverStatistics<T>) {
        self.best_value = Some(solution.total_value());
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {
        println!("{}", "-".repeat(102));
        println!("Search finished.");
    }
}
