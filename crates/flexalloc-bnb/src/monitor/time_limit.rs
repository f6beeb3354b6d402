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

//! Wall-clock time budget at the tree search level. Uses the same
//! bitmask-based step filter as the generic time limit monitor so that the
//! clock is only consulted every few thousand node expansions.

use crate::{monitor::tree_search_monitor::TreeSearchMonitor, stats::BnbSolverStatistics};
use flexalloc_model::model::Model;
use flexalloc_search::{monitor::search_monitor::SearchCommand, num::SolverNumeric};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor<T> {
    clock_check_mask: u64,
    steps: u64,
    time_limit: std::time::Duration,
    start_time: std::time::Instant,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Default mask: Check every 16,384 steps (2^14).
    /// 16384 - 1 = 16383 = 0x3FFF
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    #[inline]
    pub fn new(time_limit: std::time::Duration) -> Self {
        Self {
            clock_check_mask: Self::DEFAULT_STEP_CLOCK_CHECK_MASK,
            steps: 0,
            time_limit,
            start_time: std::time::Instant::now(),
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn with_clock_check_mask(time_limit: std::time::Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            time_limit,
            start_time: std::time::Instant::now(),
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> TreeSearchMonitor<T> for TimeLimitMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _model: &Model<T>, _statistics: &BnbSolverStatistics<T>) {
        self.start_time = std::time::Instant::now();
        self.steps = 0;
    }

    #[inline(always)]
    fn on_step(&mut self, _statistics: &BnbSolverStatistics<T>) {
        self.steps = self.steps.wrapping_add(1);
    }

    #[inline(always)]
    fn search_command(&mut self, _statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        if (self.steps & self.clock_check_mask) == 0 && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    type IntegerType = i64;

    #[test]
    fn test_zero_budget_terminates_immediately() {
        let mut monitor = TimeLimitMonitor::<IntegerType>::new(Duration::ZERO);
        let stats = BnbSolverStatistics::new();
        // steps == 0 passes the mask filter, so the clock is consulted.
        assert!(matches!(
            monitor.search_command(&stats),
            SearchCommand::Terminate(reason) if reason == "time limit reached"
        ));
    }

    #[test]
    fn test_large_budget_continues() {
        let mut monitor = TimeLimitMonitor::<IntegerType>::new(Duration::from_secs(3600));
        let stats = BnbSolverStatistics::new();
        assert_eq!(monitor.search_command(&stats), SearchCommand::Continue);
    }

    #[test]
    fn test_mask_skips_clock_checks() {
        let mut monitor =
            TimeLimitMonitor::<IntegerType>::with_clock_check_mask(Duration::ZERO, 0x3);
        let stats = BnbSolverStatistics::new();

        // Steps 1..=3 do not pass the mask filter even though the budget is
        // already exceeded.
        monitor.on_step(&stats);
        assert_eq!(monitor.search_command(&stats), SearchCommand::Continue);
        monitor.on_step(&stats);
        monitor.on_step(&stats);
        assert_eq!(monitor.search_command(&stats), SearchCommand::Continue);

        // Step 4 is a check point.
        monitor.on_step(&stats);
        assert!(matches!(
            monitor.search_command(&stats),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_enter_search_resets_the_clock() {
        let mut monitor = TimeLimitMonitor::<IntegerType>::new(Duration::from_secs(3600));
        let stats = BnbSolverStatistics::new();
        for _ in 0..100 {
            monitor.on_step(&stats);
        }

        let model = flexalloc_model::model::ModelBuilder::<IntegerType>::new(0, 0).build();
        monitor.on_enter_search(&model, &stats);
        assert_eq!(monitor.steps, 0);
    }
}
