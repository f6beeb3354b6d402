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

//! # Portfolio-Orchestrated Solver
//!
//! A high-level orchestrator that runs multiple solver strategies in
//! parallel, manages a shared incumbent, and enforces global termination
//! criteria via pluggable monitors (time limit, solution count, external
//! interrupt).
//!
//! ## Motivation
//!
//! Different strategies perform better on different instances. This solver
//! coordinates a portfolio of strategies, letting them compete to install
//! the best solution while respecting global limits and early-stop signals
//! when optimality is proven elsewhere.
//!
//! ## Highlights
//!
//! - Portfolio execution:
//!   - Spawn each `PortfolioSolver<T>` in a thread using `std::thread::scope`.
//!   - Build a `CompositeMonitor<T>` per thread with interrupt,
//!     solution-limit, and optional time-limit monitors.
//! - Shared state:
//!   - `SharedIncumbent<T>` stores the best solution (atomic best value +
//!     mutex snapshot).
//!   - Global counters (`AtomicU64`) for solutions found; `AtomicBool` stop
//!     signal.
//! - Outcome construction:
//!   - Aggregates thread results, determines the best global solution, and
//!     returns `SolverOutcome<T>` with statistics and termination reason.
//! - Builder pattern:
//!   - `SolverBuilder` to configure solution/time limits and add portfolio
//!     solvers.

use flexalloc_model::model::Model;
use flexalloc_search::{
    incumbent::SharedIncumbent,
    monitor::{
        composite::CompositeMonitor, interrupt::InterruptMonitor, solution::SolutionMonitor,
        time_limit::TimeLimitMonitor,
    },
    num::SolverNumeric,
    portfolio::{PortfolioSolver, PortfolioSolverContext, PortfolioSolverResult},
    result::{SolverOutcome, SolverResult, TerminationReason},
    stats::{SolverStatistics, SolverStatisticsBuilder},
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

pub struct Solver<'a, T> {
    portfolio_solver: Vec<Box<dyn PortfolioSolver<T> + Send + 'a>>,
    incumbent: SharedIncumbent<T>,
    global_solution_count: AtomicU64,
    /// Shared flag to signal all solvers to stop (e.g., when optimality is proven).
    stop_signal: AtomicBool,
    solution_limit: Option<u64>,
    time_limit: Option<std::time::Duration>,
}

impl<'a, T> Solver<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn add_solver<S>(&mut self, solver: S)
    where
        S: PortfolioSolver<T> + Send + 'a,
    {
        self.portfolio_solver.push(Box::new(solver));
    }

    #[inline]
    pub fn add_solver_boxed(&mut self, solver: Box<dyn PortfolioSolver<T> + Send + 'a>) {
        self.portfolio_solver.push(solver);
    }

    #[inline]
    pub fn incumbent(&self) -> &SharedIncumbent<T> {
        &self.incumbent
    }

    #[inline]
    pub fn solution_limit(&self) -> Option<u64> {
        self.solution_limit
    }

    #[inline]
    pub fn has_solution_limit(&self) -> bool {
        self.solution_limit.is_some()
    }

    #[inline]
    pub fn time_limit(&self) -> Option<std::time::Duration> {
        self.time_limit
    }

    #[inline]
    pub fn has_time_limit(&self) -> bool {
        self.time_limit.is_some()
    }

    /// Runs every portfolio solver against the model and combines their
    /// results into a single outcome.
    ///
    /// # Panics
    ///
    /// Panics if no portfolio solvers were added.
    pub fn solve(&mut self, model: &Model<T>) -> SolverOutcome<T> {
        assert!(
            !self.portfolio_solver.is_empty(),
            "called `Solver::solve` with no portfolio solvers added"
        );

        let start_time = std::time::Instant::now();

        // 1. Reset state for this run
        self.stop_signal.store(false, Ordering::Relaxed);
        self.global_solution_count.store(0, Ordering::Relaxed);

        // 2. Run parallel solvers
        let results = self.run_portfolio_parallel(model);

        // 3. Construct and return the outcome
        self.construct_outcome(start_time, results)
    }

    /// Internal helper to spawn threads and collect results.
    fn run_portfolio_parallel(&mut self, model: &Model<T>) -> Vec<PortfolioSolverResult<T>> {
        // Capture references for threads
        let solution_limit = self.solution_limit;
        let time_limit = self.time_limit;
        let incumbent = &self.incumbent;
        let global_solution_count = &self.global_solution_count;
        let stop_signal = &self.stop_signal;

        let mut results = Vec::with_capacity(self.portfolio_solver.len());

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.portfolio_solver.len());

            for solver in &mut self.portfolio_solver {
                let handle = scope.spawn(move || {
                    // 1. Build the monitor stack. The interrupt monitor is
                    // always present so this thread can be stopped when
                    // another thread finishes early.
                    let mut monitor = CompositeMonitor::<T>::new();
                    monitor.add_monitor(InterruptMonitor::new(stop_signal));
                    monitor.add_monitor(SolutionMonitor::new(global_solution_count, solution_limit));

                    if let Some(limit) = time_limit {
                        monitor.add_monitor(TimeLimitMonitor::new(limit));
                    }

                    // 2. Run the solver
                    let ctx =
                        PortfolioSolverContext::new(model, incumbent, &mut monitor, stop_signal);
                    let result = solver.solve(ctx);

                    // 3. Signal stop if optimal
                    if matches!(result.result(), SolverResult::Optimal(_)) {
                        stop_signal.store(true, Ordering::Relaxed);
                    }

                    result
                });
                handles.push(handle);
            }

            for handle in handles {
                results.push(handle.join().expect("portfolio solver thread panicked"));
            }
        });

        results
    }

    /// Finds the absolute best solution among all thread results and the
    /// shared incumbent.
    fn find_best_solution(
        &self,
        results: &[PortfolioSolverResult<T>],
    ) -> Option<flexalloc_model::solution::Solution<T>> {
        let thread_solutions = results.iter().filter_map(|r| match r.result() {
            SolverResult::Optimal(s) | SolverResult::Feasible(s) => Some(s),
            _ => None,
        });

        let incumbent_snapshot = self.incumbent.snapshot();

        thread_solutions
            .chain(incumbent_snapshot.as_ref())
            .max_by_key(|s| s.total_value())
            .cloned()
    }

    fn build_statistics(
        &self,
        start_time: std::time::Instant,
        used_threads: usize,
    ) -> SolverStatistics {
        SolverStatisticsBuilder::new()
            .solutions_found(self.global_solution_count.load(Ordering::Relaxed))
            .used_threads(used_threads)
            .solve_duration(start_time.elapsed())
            .build()
    }

    fn construct_outcome(
        &self,
        start_time: std::time::Instant,
        results: Vec<PortfolioSolverResult<T>>,
    ) -> SolverOutcome<T> {
        let stats = self.build_statistics(start_time, results.len());

        // 1. Always identify the best solution globally first.
        let best_solution = self.find_best_solution(&results);

        // 2. Check if any thread proved the global optimum.
        let optimality_proven = results
            .iter()
            .any(|r| matches!(r.result(), SolverResult::Optimal(_)));

        // 3. Hierarchy: Optimality > Infeasibility > Aborted
        if let Some(sol) = best_solution {
            if optimality_proven {
                return SolverOutcome::optimal(sol, stats);
            }
            // A solution without a proof is the best "Feasible" one.
            let reason = self.determine_abort_reason(&results);
            return SolverOutcome::feasible(sol, reason, stats);
        }

        // 4. No solution anywhere; was infeasibility proven?
        if results
            .iter()
            .any(|r| matches!(r.result(), SolverResult::Infeasible))
        {
            return SolverOutcome::infeasible(stats);
        }

        // 5. Fallback: Unknown
        let reason = self.determine_abort_reason(&results);
        SolverOutcome::unknown(reason, stats)
    }

    fn determine_abort_reason(&self, results: &[PortfolioSolverResult<T>]) -> String {
        // 1. Explicit monitor trigger (time/solution limit)
        if let Some(msg) = results.iter().find_map(|res| {
            if let TerminationReason::Aborted(msg) = res.termination_reason() {
                Some(msg.clone())
            } else {
                None
            }
        }) {
            return msg;
        }

        // 2. Global signal (interrupt or optimality found elsewhere)
        if self.stop_signal.load(Ordering::Relaxed) {
            return "external interrupt".to_string();
        }

        // 3. Natural exhaustion without a usable proof
        "search space exhausted without proof".to_string()
    }
}

pub struct SolverBuilder<'a, T> {
    portfolio_solver: Vec<Box<dyn PortfolioSolver<T> + Send + 'a>>,
    solution_limit: Option<u64>,
    time_limit: Option<std::time::Duration>,
}

impl<'a, T> Default for SolverBuilder<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> SolverBuilder<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            portfolio_solver: Vec::new(),
            solution_limit: None,
            time_limit: None,
        }
    }

    #[inline]
    pub fn with_solution_limit(mut self, limit: u64) -> Self {
        self.solution_limit = Some(limit);
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: std::time::Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[inline]
    pub fn add_solver<S>(mut self, solver: S) -> Self
    where
        S: PortfolioSolver<T> + Send + 'a,
    {
        self.portfolio_solver.push(Box::new(solver));
        self
    }

    #[inline]
    pub fn build(self) -> Solver<'a, T> {
        Solver {
            portfolio_solver: self.portfolio_solver,
            incumbent: SharedIncumbent::new(),
            global_solution_count: AtomicU64::new(0),
            stop_signal: AtomicBool::new(false),
            solution_limit: self.solution_limit,
            time_limit: self.time_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexalloc_bnb::{
        bound::AggregateRelaxation,
        feasibility::{SumSpeedCubes, WeightedSumSpeeds},
        portfolio::BnbPortfolioSolver,
    };
    use flexalloc_model::{
        index::{JobIndex, ServerIndex},
        model::ModelBuilder,
    };

    type IntegerType = i64;

    fn build_model() -> flexalloc_model::model::Model<IntegerType> {
        let mut builder = ModelBuilder::<IntegerType>::new(3, 2);
        builder
            .set_job_requirements(JobIndex::new(0), 2, 2, 2)
            .set_job_value(JobIndex::new(0), 10)
            .set_job_deadline(JobIndex::new(0), 3)
            .set_job_requirements(JobIndex::new(1), 1, 1, 1)
            .set_job_value(JobIndex::new(1), 7)
            .set_job_deadline(JobIndex::new(1), 3)
            .set_job_requirements(JobIndex::new(2), 1, 1, 1)
            .set_job_value(JobIndex::new(2), 4)
            .set_job_deadline(JobIndex::new(2), 3)
            .set_server_capacities(ServerIndex::new(0), 3, 3, 3)
            .set_server_capacities(ServerIndex::new(1), 2, 2, 2);
        builder.build()
    }

    #[test]
    fn test_portfolio_solver_proves_optimality() {
        let model = build_model();

        let first_solver = BnbPortfolioSolver::new(
            WeightedSumSpeeds::<IntegerType>::default(),
            AggregateRelaxation::new(),
        );
        let second_solver =
            BnbPortfolioSolver::new(SumSpeedCubes::new(), AggregateRelaxation::new());

        let mut solver = SolverBuilder::<IntegerType>::new()
            .add_solver(first_solver)
            .add_solver(second_solver)
            .build();

        let outcome = solver.solve(&model);
        assert!(outcome.is_optimal());
        assert_eq!(outcome.statistics.used_threads, 2);

        // Jobs 0 and 1 fill server 0, job 2 runs on server 1.
        match &outcome.result {
            SolverResult::Optimal(solution) => {
                assert_eq!(solution.total_value(), 21);
            }
            other => panic!("expected an optimal solution, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_time_limit_yields_no_proof() {
        let model = build_model();

        let mut solver = SolverBuilder::<IntegerType>::new()
            .with_time_limit(std::time::Duration::ZERO)
            .add_solver(BnbPortfolioSolver::new(
                WeightedSumSpeeds::<IntegerType>::default(),
                AggregateRelaxation::new(),
            ))
            .build();

        assert!(solver.has_time_limit());
        let outcome = solver.solve(&model);
        assert!(!outcome.is_optimal());
        assert!(matches!(outcome.reason, TerminationReason::Aborted(_)));
    }

    #[test]
    fn test_budgeted_welfare_never_exceeds_optimum() {
        let model = build_model();

        let mut unlimited = SolverBuilder::<IntegerType>::new()
            .add_solver(BnbPortfolioSolver::new(
                WeightedSumSpeeds::<IntegerType>::default(),
                AggregateRelaxation::new(),
            ))
            .build();
        let optimum = unlimited.solve(&model);
        assert!(optimum.is_optimal());
        let optimal_value = optimum
            .solution()
            .map(|s| s.total_value())
            .expect("an optimal outcome carries a solution");

        // Any solution a budgeted run surfaces was installed by the same
        // exact engine, so its welfare is bounded by the true optimum.
        for budget in [std::time::Duration::ZERO, std::time::Duration::from_millis(1)] {
            let mut budgeted = SolverBuilder::<IntegerType>::new()
                .with_time_limit(budget)
                .add_solver(BnbPortfolioSolver::new(
                    WeightedSumSpeeds::<IntegerType>::default(),
                    AggregateRelaxation::new(),
                ))
                .build();
            let outcome = budgeted.solve(&model);
            if let Some(solution) = outcome.solution() {
                assert!(solution.total_value() <= optimal_value);
            }
        }
    }

    #[test]
    #[should_panic(expected = "no portfolio solvers added")]
    fn test_solve_without_solvers_panics() {
        let model = build_model();
        let mut solver = SolverBuilder::<IntegerType>::new().build();
        let _ = solver.solve(&model);
    }

    #[test]
    fn test_repeated_solves_reset_state() {
        let model = build_model();

        let mut solver = SolverBuilder::<IntegerType>::new()
            .add_solver(BnbPortfolioSolver::new(
                WeightedSumSpeeds::<IntegerType>::default(),
                AggregateRelaxation::new(),
            ))
            .build();

        let first = solver.solve(&model);
        let second = solver.solve(&model);
        assert!(first.is_optimal());
        assert!(second.is_optimal());
        assert_eq!(
            first.solution().map(|s| s.total_value()),
            second.solution().map(|s| s.total_value())
        );
    }
}
