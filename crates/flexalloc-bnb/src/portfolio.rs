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

//! Adapter that runs the branch and bound engine as one strategy of a
//! `flexalloc_search` portfolio. The portfolio-level monitor, which already
//! carries the interrupt and limit monitors, is lifted into the tree
//! callback set via `WrapperMonitor`.

use crate::{
    bnb::BnbSolver, bound::RelaxationOracle, feasibility::SpeedPolicy,
    monitor::wrapper::WrapperMonitor,
};
use flexalloc_search::{
    num::SolverNumeric,
    portfolio::{PortfolioSolver, PortfolioSolverContext, PortfolioSolverResult},
};

#[derive(Clone)]
pub struct BnbPortfolioSolver<T, P, O>
where
    T: SolverNumeric,
    P: SpeedPolicy<T>,
    O: RelaxationOracle<T>,
{
    inner: BnbSolver<T>,
    policy: P,
    oracle: O,
}

impl<T, P, O> BnbPortfolioSolver<T, P, O>
where
    T: SolverNumeric,
    P: SpeedPolicy<T>,
    O: RelaxationOracle<T>,
{
    #[inline]
    pub fn new(policy: P, oracle: O) -> Self {
        Self {
            inner: BnbSolver::<T>::new(),
            policy,
            oracle,
        }
    }

    #[inline]
    pub fn preallocated(capacity: usize, policy: P, oracle: O) -> Self {
        Self {
            inner: BnbSolver::<T>::preallocated(capacity),
            policy,
            oracle,
        }
    }

    #[inline]
    pub fn inner(&self) -> &BnbSolver<T> {
        &self.inner
    }

    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    #[inline]
    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}

impl<T, P, O> PortfolioSolver<T> for BnbPortfolioSolver<T, P, O>
where
    T: SolverNumeric,
    P: SpeedPolicy<T>,
    O: RelaxationOracle<T>,
{
    fn solve<'a>(&mut self, context: PortfolioSolverContext<'a, T>) -> PortfolioSolverResult<T> {
        let monitor = WrapperMonitor::new(context.monitor);
        let outcome = self.inner.solve_with_incumbent(
            context.model,
            &self.policy,
            &self.oracle,
            monitor,
            context.incumbent,
        );

        outcome.into()
    }

    fn name(&self) -> &str {
        "BnbPortfolioSolver"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::AggregateRelaxation;
    use crate::feasibility::WeightedSumSpeeds;
    use flexalloc_model::{
        index::{JobIndex, ServerIndex},
        model::ModelBuilder,
    };
    use flexalloc_search::{
        incumbent::SharedIncumbent,
        monitor::{interrupt::InterruptMonitor, search_monitor::SearchMonitor},
        result::SolverResult,
    };
    use std::sync::atomic::{AtomicBool, Ordering};

    type IntegerType = i64;

    struct IdleMonitor;

    impl SearchMonitor<IntegerType> for IdleMonitor {
        fn name(&self) -> &str {
            "IdleMonitor"
        }

        fn on_enter_search(&mut self, _model: &flexalloc_model::model::Model<IntegerType>) {}

        fn on_exit_search(&mut self) {}

        fn on_solution_found(
            &mut self,
            _solution: &flexalloc_model::solution::Solution<IntegerType>,
        ) {
        }

        fn on_step(&mut self) {}

        fn search_command(&self) -> flexalloc_search::monitor::search_monitor::SearchCommand {
            flexalloc_search::monitor::search_monitor::SearchCommand::Continue
        }
    }

    fn build_model() -> flexalloc_model::model::Model<IntegerType> {
        let mut builder = ModelBuilder::<IntegerType>::new(2, 1);
        builder
            .set_job_requirements(JobIndex::new(0), 2, 2, 2)
            .set_job_value(JobIndex::new(0), 10)
            .set_job_deadline(JobIndex::new(0), 3)
            .set_job_requirements(JobIndex::new(1), 1, 1, 1)
            .set_job_value(JobIndex::new(1), 7)
            .set_job_deadline(JobIndex::new(1), 3)
            .set_server_capacities(ServerIndex::new(0), 3, 3, 3);
        builder.build()
    }

    #[test]
    fn test_portfolio_run_finds_optimum_and_publishes_it() {
        let model = build_model();
        let incumbent = SharedIncumbent::new();
        let stop = AtomicBool::new(false);
        let mut monitor = IdleMonitor;

        let mut solver = BnbPortfolioSolver::new(
            WeightedSumSpeeds::<IntegerType>::default(),
            AggregateRelaxation::new(),
        );
        assert_eq!(solver.name(), "BnbPortfolioSolver");

        let context = PortfolioSolverContext::new(&model, &incumbent, &mut monitor, &stop);
        let result = solver.solve(context);

        match result.result() {
            SolverResult::Optimal(solution) => assert_eq!(solution.total_value(), 17),
            other => panic!("expected an optimal result, got {:?}", other),
        }
        assert_eq!(incumbent.best_value(), 17);
    }

    #[test]
    fn test_interrupted_run_aborts() {
        let model = build_model();
        let incumbent = SharedIncumbent::new();
        let stop = AtomicBool::new(false);
        stop.store(true, Ordering::Relaxed);
        let mut monitor = InterruptMonitor::<IntegerType>::new(&stop);

        let mut solver = BnbPortfolioSolver::new(
            WeightedSumSpeeds::<IntegerType>::default(),
            AggregateRelaxation::new(),
        );

        let context = PortfolioSolverContext::new(&model, &incumbent, &mut monitor, &stop);
        let result = solver.solve(context);

        assert!(matches!(result.result(), SolverResult::Unknown));
    }
}
