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

//! # Solver Results
//!
//! Terminal classification of a solve: whether a solution was found, whether
//! optimality or infeasibility was proven, and why the solver stopped.
//! `SolverOutcome<T>` bundles the result, the termination reason and the
//! collected statistics into a single return value.

use crate::stats::SolverStatistics;
use flexalloc_model::solution::Solution;
use num_traits::{PrimInt, Signed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// We have proven that the problem is infeasible.
    Infeasible,
    /// We have found a solution and proven its optimality.
    Optimal(Solution<T>),
    /// We have found a feasible solution, but not proven its optimality.
    Feasible(Solution<T>),
    /// The solver terminated without finding a solution and
    /// without proving infeasibility.
    Unknown,
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(solution) => {
                write!(f, "Optimal(value={})", solution.total_value())
            }
            SolverResult::Feasible(solution) => {
                write!(f, "Feasible(value={})", solution.total_value())
            }
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The solver found and proved optimality of a solution.
    OptimalityProven,
    /// The solver proved that the problem is infeasible.
    InfeasibilityProven,
    /// The solver aborted due to a search limit (time, solutions, etc.).
    /// The string contains information about the reason for abortion.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", *reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome<T>
where
    T: PrimInt + Signed + Copy,
{
    pub result: SolverResult<T>,
    pub reason: TerminationReason,
    pub statistics: SolverStatistics,
}

impl<T> SolverOutcome<T>
where
    T: PrimInt + Signed + Copy,
{
    #[inline]
    pub fn new(
        result: SolverResult<T>,
        reason: TerminationReason,
        statistics: SolverStatistics,
    ) -> Self {
        Self {
            result,
            reason,
            statistics,
        }
    }

    /// A solution with a proof of optimality.
    #[inline]
    pub fn optimal(solution: Solution<T>, statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::Optimal(solution),
            TerminationReason::OptimalityProven,
            statistics,
        )
    }

    /// A solution without a proof, together with the abort reason.
    #[inline]
    pub fn feasible(
        solution: Solution<T>,
        reason: impl Into<String>,
        statistics: SolverStatistics,
    ) -> Self {
        Self::new(
            SolverResult::Feasible(solution),
            TerminationReason::Aborted(reason.into()),
            statistics,
        )
    }

    /// A proof that no solution exists.
    #[inline]
    pub fn infeasible(statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::Infeasible,
            TerminationReason::InfeasibilityProven,
            statistics,
        )
    }

    /// Neither a solution nor a proof, together with the abort reason.
    #[inline]
    pub fn unknown(reason: impl Into<String>, statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::Unknown,
            TerminationReason::Aborted(reason.into()),
            statistics,
        )
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self.result, SolverResult::Feasible(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, SolverResult::Infeasible)
    }

    #[inline]
    pub fn has_solution(&self) -> bool {
        matches!(
            self.result,
            SolverResult::Optimal(_) | SolverResult::Feasible(_)
        )
    }

    /// Returns the contained solution, if any.
    #[inline]
    pub fn solution(&self) -> Option<&Solution<T>> {
        match &self.result {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => Some(solution),
            _ => None,
        }
    }
}

impl<T> std::fmt::Display for SolverOutcome<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {}", self.result)?;
        writeln!(f, "Termination: {}", self.reason)?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::{SolverOutcome, SolverResult, TerminationReason};
    use crate::stats::SolverStatisticsBuilder;
    use flexalloc_model::index::ServerIndex;
    use flexalloc_model::solution::Solution;

    fn solution_with_value(value: i64) -> Solution<i64> {
        Solution::new(
            value,
            vec![Some(ServerIndex::new(0))],
            vec![1],
            vec![1],
            vec![1],
            vec![0],
        )
    }

    #[test]
    fn test_result_display() {
        let optimal = SolverResult::Optimal(solution_with_value(7));
        assert_eq!(format!("{}", optimal), "Optimal(value=7)");

        let feasible = SolverResult::Feasible(solution_with_value(3));
        assert_eq!(format!("{}", feasible), "Feasible(value=3)");

        assert_eq!(format!("{}", SolverResult::<i64>::Infeasible), "Infeasible");
        assert_eq!(format!("{}", SolverResult::<i64>::Unknown), "Unknown");
    }

    #[test]
    fn test_termination_reason_display() {
        assert_eq!(
            format!("{}", TerminationReason::OptimalityProven),
            "Optimality Proven"
        );
        assert_eq!(
            format!("{}", TerminationReason::InfeasibilityProven),
            "Infeasibility Proven"
        );
        assert_eq!(
            format!("{}", TerminationReason::Aborted("time limit reached".into())),
            "Aborted: time limit reached"
        );
    }

    #[test]
    fn test_outcome_predicates() {
        let stats = SolverStatisticsBuilder::new().build();

        let optimal = SolverOutcome::new(
            SolverResult::Optimal(solution_with_value(10)),
            TerminationReason::OptimalityProven,
            stats.clone(),
        );
        assert!(optimal.is_optimal());
        assert!(optimal.has_solution());
        assert!(!optimal.is_feasible());
        assert!(!optimal.is_infeasible());
        assert_eq!(optimal.solution().map(|s| s.total_value()), Some(10));

        let infeasible = SolverOutcome::<i64>::new(
            SolverResult::Infeasible,
            TerminationReason::InfeasibilityProven,
            stats,
        );
        assert!(infeasible.is_infeasible());
        assert!(!infeasible.has_solution());
        assert!(infeasible.solution().is_none());
    }

    #[test]
    fn test_outcome_display_contains_all_sections() {
        let stats = SolverStatisticsBuilder::new().solutions_found(2).build();
        let outcome = SolverOutcome::new(
            SolverResult::Optimal(solution_with_value(42)),
            TerminationReason::OptimalityProven,
            stats,
        );

        let rendered = format!("{}", outcome);
        assert!(rendered.contains("Result: Optimal(value=42)"));
        assert!(rendered.contains("Termination: Optimality Proven"));
        assert!(rendered.contains("Solver Statistics:"));
        assert!(rendered.contains("Solutions Found: 2"));
    }
}
