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

//! # Relaxation Oracles
//!
//! An upper bound on the total value reachable from a partial allocation.
//! The branch and bound engine prunes every frontier node whose bound does
//! not beat the incumbent, so the bound must be admissible: it may never
//! undershoot the true optimum of the subtree it summarises.
//!
//! `AggregateRelaxation` pools the residual capacities of all servers into
//! one virtual server and credits every undecided job that could meet its
//! deadline alone on that pool. Pooling ignores fragmentation and crediting
//! jobs independently ignores contention, so the estimate only ever errs
//! upward. Along any root to leaf path the aggregate shrinks while decided
//! value moves from the credit sum into the accumulated term exactly, so the
//! bound is monotone non-increasing from parent to child.

use crate::feasibility::can_run;
use flexalloc_model::{
    capacity::Capacity,
    index::{JobIndex, ServerIndex},
    ledger::AllocationLedger,
    model::Model,
};
use flexalloc_search::num::SolverNumeric;

/// An admissible upper bound on the value completable from a partial
/// allocation.
pub trait RelaxationOracle<T>
where
    T: SolverNumeric,
{
    /// Returns the name of the relaxation oracle.
    fn name(&self) -> &str;

    /// Upper bound on the total value of any completion of `ledger` where
    /// jobs `0..next_job` are decided and `accumulated` is their value.
    ///
    /// Implementations must be admissible with respect to the allocation
    /// semantics of `AllocationLedger`.
    fn bound(
        &self,
        model: &Model<T>,
        ledger: &AllocationLedger<T>,
        next_job: usize,
        accumulated: T,
    ) -> T;
}

impl<T> std::fmt::Debug for dyn RelaxationOracle<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RelaxationOracle({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn RelaxationOracle<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RelaxationOracle({})", self.name())
    }
}

/// Bounds by pooling all residual capacities into one virtual server and
/// crediting every undecided job that is individually feasible on the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregateRelaxation;

impl AggregateRelaxation {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    fn aggregate_residual<T>(ledger: &AllocationLedger<T>) -> Capacity<T>
    where
        T: SolverNumeric,
    {
        let mut aggregate = Capacity::new(T::zero(), T::zero(), T::zero());
        for server in 0..ledger.num_servers() {
            aggregate = aggregate.saturating_add(&ledger.residual(ServerIndex::new(server)));
        }
        aggregate
    }
}

impl<T> RelaxationOracle<T> for AggregateRelaxation
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "AggregateRelaxation"
    }

    fn bound(
        &self,
        model: &Model<T>,
        ledger: &AllocationLedger<T>,
        next_job: usize,
        accumulated: T,
    ) -> T {
        let aggregate = Self::aggregate_residual(ledger);

        let mut bound = accumulated;
        for job in next_job..model.num_jobs() {
            let job_index = JobIndex::new(job);
            if can_run(model, job_index, &aggregate) {
                bound = bound.saturating_add_val(model.job_value(job_index));
            }
        }
        bound
    }
}
