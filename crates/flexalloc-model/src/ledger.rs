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

//! # Allocation Ledger
//!
//! Mutable allocation state layered over an immutable `Model`: which job
//! runs where at which speeds and price, and how much residual capacity
//! every server has left.
//!
//! ## Deadline arithmetic
//!
//! A job with requirements `(storage, computation, results)` and deadline
//! `d` served at speeds `(l, c, s)` meets its deadline iff
//!
//! ```text
//! storage * c * s  +  l * computation * s  +  l * c * results
//!     <=  d * l * c * s
//! ```
//!
//! This is the fractional constraint `storage/l + computation/c +
//! results/s <= d` cross-multiplied into integers. The check must stay in
//! exact integer arithmetic: a floating point evaluation of the fractional
//! form can flip a comparison that is exactly tight (`1/3 + 1/3 + 1/3` is
//! greater than `1.0` in f64). Every product is checked, and an overflowing
//! evaluation counts as a violated deadline; the same predicate backs the
//! feasibility oracle and the relaxation bound, so pruning and
//! materialisation can never disagree.
//!
//! ## Usage
//!
//! ```rust
//! use flexalloc_model::{
//!     capacity::SpeedTriple,
//!     index::{JobIndex, ServerIndex},
//!     ledger::AllocationLedger,
//!     model::ModelBuilder,
//! };
//!
//! let mut builder = ModelBuilder::<i64>::new(1, 1);
//! builder.set_job_requirements(JobIndex::new(0), 2, 2, 2);
//! builder.set_job_deadline(JobIndex::new(0), 3);
//! builder.set_server_capacities(ServerIndex::new(0), 8, 8, 8);
//! let model = builder.build();
//!
//! let mut ledger = AllocationLedger::new(&model);
//! ledger
//!     .allocate(&model, JobIndex::new(0), ServerIndex::new(0), SpeedTriple::new(3, 3, 3), 0)
//!     .unwrap();
//! assert!(ledger.is_assigned(JobIndex::new(0)));
//! ```

use crate::{
    capacity::{Capacity, ResourceDimension, SpeedTriple},
    index::{JobIndex, ServerIndex},
    model::Model,
};
use flexalloc_core::num::ops::{
    checked_arithmetic::{CheckedAddVal, CheckedMulVal},
    saturating_arithmetic::SaturatingAddVal,
};
use num_traits::{PrimInt, Signed};

/// Checks the deadline constraint for a job served at the given speeds,
/// in exact integer arithmetic.
///
/// All inputs must be strictly positive; an overflowing evaluation counts
/// as a violated deadline.
///
/// # Examples
///
/// ```rust
/// # use flexalloc_model::{capacity::SpeedTriple, ledger::deadline_holds};
/// // 2*3*3 + 3*2*3 + 3*3*2 = 54 <= 3*3*3*3 = 81
/// assert!(deadline_holds(2i64, 2, 2, 3, &SpeedTriple::new(3, 3, 3)));
/// // 1/3 + 1/3 + 1/3 is exactly 1: 27 <= 27.
/// assert!(deadline_holds(1i64, 1, 1, 1, &SpeedTriple::new(3, 3, 3)));
/// ```
pub fn deadline_holds<T>(
    storage: T,
    computation: T,
    results_data: T,
    deadline: T,
    speeds: &SpeedTriple<T>,
) -> bool
where
    T: PrimInt + Signed + CheckedAddVal + CheckedMulVal,
{
    debug_assert!(
        speeds.is_valid(),
        "called `deadline_holds` with a non-positive speed"
    );

    let l = speeds.loading;
    let c = speeds.compute;
    let s = speeds.sending;

    let lhs = storage
        .checked_mul_val(c)
        .and_then(|v| v.checked_mul_val(s))
        .and_then(|storage_term| {
            l.checked_mul_val(computation)
                .and_then(|v| v.checked_mul_val(s))
                .and_then(|computation_term| storage_term.checked_add_val(computation_term))
        })
        .and_then(|partial| {
            l.checked_mul_val(c)
                .and_then(|v| v.checked_mul_val(results_data))
                .and_then(|results_term| partial.checked_add_val(results_term))
        });

    let rhs = deadline
        .checked_mul_val(l)
        .and_then(|v| v.checked_mul_val(c))
        .and_then(|v| v.checked_mul_val(s));

    match (lhs, rhs) {
        (Some(lhs), Some(rhs)) => lhs <= rhs,
        _ => false,
    }
}

/// Errors raised by `AllocationLedger::allocate`.
///
/// All of these are contract violations from the engine's point of view:
/// the feasibility oracle vets every assignment before the ledger sees it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AllocationError {
    /// A speed in the triple was zero or negative.
    InvalidSpeed {
        /// The job whose allocation was rejected.
        job: JobIndex,
    },
    /// The deadline constraint does not hold for the given speeds.
    DeadlineInfeasible {
        /// The job whose allocation was rejected.
        job: JobIndex,
        /// The target server.
        server: ServerIndex,
    },
    /// The allocation would exceed a server's residual capacity.
    CapacityExceeded {
        /// The job whose allocation was rejected.
        job: JobIndex,
        /// The target server.
        server: ServerIndex,
        /// The dimension that would go negative.
        dimension: ResourceDimension,
    },
    /// The job already has an allocation.
    AlreadyAssigned {
        /// The job whose allocation was rejected.
        job: JobIndex,
    },
}

impl std::fmt::Display for AllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationError::InvalidSpeed { job } => {
                write!(f, "invalid speed for {}: all speeds must be positive", job)
            }
            AllocationError::DeadlineInfeasible { job, server } => {
                write!(f, "deadline of {} cannot be met on {}", job, server)
            }
            AllocationError::CapacityExceeded {
                job,
                server,
                dimension,
            } => {
                write!(
                    f,
                    "allocating {} on {} exceeds its residual {} capacity",
                    job, server, dimension
                )
            }
            AllocationError::AlreadyAssigned { job } => {
                write!(f, "{} is already assigned", job)
            }
        }
    }
}

impl std::error::Error for AllocationError {}

/// The server and speed triple of one assigned job.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct JobAssignment<T> {
    server: ServerIndex,
    speeds: SpeedTriple<T>,
}

impl<T> JobAssignment<T>
where
    T: PrimInt + Signed,
{
    /// The server running the job.
    #[inline]
    pub fn server(&self) -> ServerIndex {
        self.server
    }

    /// The chosen speed triple.
    #[inline]
    pub fn speeds(&self) -> SpeedTriple<T> {
        self.speeds
    }
}

/// Mutable allocation state over an immutable `Model`.
///
/// Tracks per-job assignments, per-job prices, and per-server residual
/// capacities. Cloning a ledger snapshots the full allocation state; the
/// search engine clones one per frontier node.
///
/// Prices outlive assignments: `reset_allocation` clears a job's price,
/// `reset_allocation_keep_price` preserves it for re-solves that start from
/// previously negotiated prices.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AllocationLedger<T> {
    assignments: Vec<Option<JobAssignment<T>>>,
    prices: Vec<T>,
    residuals: Vec<Capacity<T>>,
}

impl<T> AllocationLedger<T>
where
    T: PrimInt + Signed + CheckedAddVal + CheckedMulVal + SaturatingAddVal,
{
    /// Creates a ledger with no assignments and full residual capacities.
    pub fn new(model: &Model<T>) -> Self {
        Self {
            assignments: vec![None; model.num_jobs()],
            prices: vec![T::zero(); model.num_jobs()],
            residuals: model.server_capacities().to_vec(),
        }
    }

    /// Returns the number of jobs tracked by this ledger.
    #[inline]
    pub fn num_jobs(&self) -> usize {
        self.assignments.len()
    }

    /// Returns the number of servers tracked by this ledger.
    #[inline]
    pub fn num_servers(&self) -> usize {
        self.residuals.len()
    }

    /// Returns the residual capacity of a server.
    ///
    /// # Panics
    ///
    /// Panics if `server_index` is out of bounds.
    #[inline]
    pub fn residual(&self, server_index: ServerIndex) -> Capacity<T> {
        let index = server_index.get();
        debug_assert!(
            index < self.num_servers(),
            "called `AllocationLedger::residual` with server index out of bounds: the len is {} but the index is {}",
            self.num_servers(),
            index
        );

        self.residuals[index]
    }

    /// Returns the assignment of a job, if any.
    #[inline]
    pub fn assignment(&self, job_index: JobIndex) -> Option<&JobAssignment<T>> {
        let index = job_index.get();
        debug_assert!(
            index < self.num_jobs(),
            "called `AllocationLedger::assignment` with job index out of bounds: the len is {} but the index is {}",
            self.num_jobs(),
            index
        );

        self.assignments[index].as_ref()
    }

    /// Checks whether a job is currently assigned.
    #[inline]
    pub fn is_assigned(&self, job_index: JobIndex) -> bool {
        self.assignment(job_index).is_some()
    }

    /// Returns the recorded price of a job.
    ///
    /// Prices default to zero and survive `reset_allocation_keep_price`.
    #[inline]
    pub fn price(&self, job_index: JobIndex) -> T {
        let index = job_index.get();
        debug_assert!(
            index < self.num_jobs(),
            "called `AllocationLedger::price` with job index out of bounds: the len is {} but the index is {}",
            self.num_jobs(),
            index
        );

        self.prices[index]
    }

    /// Returns a job's utility: its value minus its recorded price.
    #[inline]
    pub fn utility(&self, model: &Model<T>, job_index: JobIndex) -> T {
        model.job_value(job_index) - self.price(job_index)
    }

    /// Assigns a job to a server at the given speeds and price.
    ///
    /// Fails with `InvalidSpeed` if any speed is non-positive, with
    /// `DeadlineInfeasible` if the deadline constraint does not hold, with
    /// `CapacityExceeded` if the server's residual capacity cannot carry the
    /// speeds, and with `AlreadyAssigned` if the job holds an allocation.
    /// On success the state transition is atomic: the job's allocation
    /// fields are set and the residuals are decremented by the speeds.
    pub fn allocate(
        &mut self,
        model: &Model<T>,
        job_index: JobIndex,
        server_index: ServerIndex,
        speeds: SpeedTriple<T>,
        price: T,
    ) -> Result<(), AllocationError> {
        debug_assert!(
            job_index.get() < self.num_jobs(),
            "called `AllocationLedger::allocate` with job index out of bounds: the len is {} but the index is {}",
            self.num_jobs(),
            job_index.get()
        );
        debug_assert!(
            server_index.get() < self.num_servers(),
            "called `AllocationLedger::allocate` with server index out of bounds: the len is {} but the index is {}",
            self.num_servers(),
            server_index.get()
        );

        if self.assignments[job_index.get()].is_some() {
            return Err(AllocationError::AlreadyAssigned { job: job_index });
        }
        if !speeds.is_valid() {
            return Err(AllocationError::InvalidSpeed { job: job_index });
        }
        if !deadline_holds(
            model.job_storage(job_index),
            model.job_computation(job_index),
            model.job_results_data(job_index),
            model.job_deadline(job_index),
            &speeds,
        ) {
            return Err(AllocationError::DeadlineInfeasible {
                job: job_index,
                server: server_index,
            });
        }

        let residual = &mut self.residuals[server_index.get()];
        if let Some(dimension) = residual.exceeded_dimension(&speeds) {
            return Err(AllocationError::CapacityExceeded {
                job: job_index,
                server: server_index,
                dimension,
            });
        }

        residual.consume(&speeds);
        self.assignments[job_index.get()] = Some(JobAssignment {
            server: server_index,
            speeds,
        });
        self.prices[job_index.get()] = price;
        Ok(())
    }

    /// Clears a job's allocation and price, restoring its server's residual
    /// capacity. A no-op when the job is unassigned.
    pub fn reset_allocation(&mut self, job_index: JobIndex) {
        self.reset_inner(job_index);
        self.prices[job_index.get()] = T::zero();
    }

    /// Clears a job's allocation but keeps its recorded price.
    ///
    /// Used by comparison runs that re-solve with previously negotiated
    /// prices in place.
    pub fn reset_allocation_keep_price(&mut self, job_index: JobIndex) {
        self.reset_inner(job_index);
    }

    fn reset_inner(&mut self, job_index: JobIndex) {
        let index = job_index.get();
        debug_assert!(
            index < self.num_jobs(),
            "called `AllocationLedger::reset_allocation` with job index out of bounds: the len is {} but the index is {}",
            self.num_jobs(),
            index
        );

        if let Some(assignment) = self.assignments[index].take() {
            self.residuals[assignment.server.get()].restore(&assignment.speeds);
        }
    }

    /// Total value of all currently assigned jobs.
    pub fn assigned_value(&self, model: &Model<T>) -> T {
        let mut total = T::zero();
        for (index, assignment) in self.assignments.iter().enumerate() {
            if assignment.is_some() {
                total = total.saturating_add_val(model.job_value(JobIndex::new(index)));
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelBuilder;

    fn ji(i: usize) -> JobIndex {
        JobIndex::new(i)
    }

    fn si(i: usize) -> ServerIndex {
        ServerIndex::new(i)
    }

    fn small_model() -> Model<i64> {
        let mut builder = ModelBuilder::<i64>::new(2, 1);
        builder.set_job_requirements(ji(0), 2, 2, 2);
        builder.set_job_value(ji(0), 10);
        builder.set_job_deadline(ji(0), 3);
        builder.set_job_requirements(ji(1), 1, 1, 1);
        builder.set_job_value(ji(1), 4);
        builder.set_job_deadline(ji(1), 2);
        builder.set_server_capacities(si(0), 8, 8, 8);
        builder.build()
    }

    #[test]
    fn test_deadline_holds_documented_case() {
        // 2*3*3 + 3*2*3 + 3*3*2 = 54 <= 3*3*3*3 = 81
        assert!(deadline_holds(2i64, 2, 2, 3, &SpeedTriple::new(3, 3, 3)));
    }

    #[test]
    fn test_deadline_exact_boundary_where_floats_disagree() {
        // storage/l + computation/c + results/s = 1/3 + 1/3 + 1/3, which is
        // exactly the deadline of 1. In f64 the sum is 1.0000000000000002
        // and would be rejected; the integer form 27 <= 27 accepts it.
        let float_sum = 1.0f64 / 3.0 + 1.0 / 3.0 + 1.0 / 3.0;
        assert!(float_sum > 1.0);
        assert!(deadline_holds(1i64, 1, 1, 1, &SpeedTriple::new(3, 3, 3)));
    }

    #[test]
    fn test_deadline_violated() {
        // 1/1 + 1/1 + 1/1 = 3 > 2.
        assert!(!deadline_holds(1i64, 1, 1, 2, &SpeedTriple::new(1, 1, 1)));
    }

    #[test]
    fn test_deadline_overflow_counts_as_violation() {
        let huge = i64::MAX / 2;
        assert!(!deadline_holds(
            huge,
            huge,
            huge,
            huge,
            &SpeedTriple::new(huge, huge, huge)
        ));
    }

    #[test]
    fn test_allocate_consumes_residuals() {
        let model = small_model();
        let mut ledger = AllocationLedger::new(&model);

        ledger
            .allocate(&model, ji(0), si(0), SpeedTriple::new(3, 3, 3), 0)
            .unwrap();

        assert!(ledger.is_assigned(ji(0)));
        assert_eq!(ledger.residual(si(0)), Capacity::new(5, 5, 5));
        assert_eq!(ledger.assigned_value(&model), 10);

        let assignment = ledger.assignment(ji(0)).unwrap();
        assert_eq!(assignment.server(), si(0));
        assert_eq!(assignment.speeds(), SpeedTriple::new(3, 3, 3));
    }

    #[test]
    fn test_allocate_rejects_invalid_speed() {
        let model = small_model();
        let mut ledger = AllocationLedger::new(&model);

        let err = ledger
            .allocate(&model, ji(0), si(0), SpeedTriple::new(0, 3, 3), 0)
            .unwrap_err();
        assert_eq!(err, AllocationError::InvalidSpeed { job: ji(0) });
    }

    #[test]
    fn test_allocate_rejects_infeasible_deadline() {
        let model = small_model();
        let mut ledger = AllocationLedger::new(&model);

        // 2/1 + 2/1 + 2/1 = 6 > 3.
        let err = ledger
            .allocate(&model, ji(0), si(0), SpeedTriple::new(1, 1, 1), 0)
            .unwrap_err();
        assert_eq!(
            err,
            AllocationError::DeadlineInfeasible {
                job: ji(0),
                server: si(0)
            }
        );
    }

    #[test]
    fn test_allocate_rejects_capacity_excess() {
        let model = small_model();
        let mut ledger = AllocationLedger::new(&model);

        // Speeds meet the deadline easily but exceed the storage capacity.
        let err = ledger
            .allocate(&model, ji(0), si(0), SpeedTriple::new(9, 3, 3), 0)
            .unwrap_err();
        assert_eq!(
            err,
            AllocationError::CapacityExceeded {
                job: ji(0),
                server: si(0),
                dimension: ResourceDimension::Storage
            }
        );
        // Failed allocation leaves the ledger untouched.
        assert_eq!(ledger.residual(si(0)), Capacity::new(8, 8, 8));
        assert!(!ledger.is_assigned(ji(0)));
    }

    #[test]
    fn test_allocate_rejects_double_assignment() {
        let model = small_model();
        let mut ledger = AllocationLedger::new(&model);

        ledger
            .allocate(&model, ji(0), si(0), SpeedTriple::new(3, 3, 3), 0)
            .unwrap();
        let err = ledger
            .allocate(&model, ji(0), si(0), SpeedTriple::new(3, 3, 3), 0)
            .unwrap_err();
        assert_eq!(err, AllocationError::AlreadyAssigned { job: ji(0) });
    }

    #[test]
    fn test_reset_restores_pre_allocation_state() {
        let model = small_model();
        let mut ledger = AllocationLedger::new(&model);
        let pristine = ledger.clone();

        ledger
            .allocate(&model, ji(0), si(0), SpeedTriple::new(3, 3, 3), 5)
            .unwrap();
        ledger.reset_allocation(ji(0));

        assert_eq!(ledger, pristine);

        // Resetting an unassigned job is a no-op, not an error.
        ledger.reset_allocation(ji(0));
        assert_eq!(ledger, pristine);
    }

    #[test]
    fn test_reset_keep_price_preserves_price() {
        let model = small_model();
        let mut ledger = AllocationLedger::new(&model);

        ledger
            .allocate(&model, ji(0), si(0), SpeedTriple::new(3, 3, 3), 5)
            .unwrap();
        assert_eq!(ledger.price(ji(0)), 5);
        assert_eq!(ledger.utility(&model, ji(0)), 5);

        ledger.reset_allocation_keep_price(ji(0));
        assert!(!ledger.is_assigned(ji(0)));
        assert_eq!(ledger.price(ji(0)), 5);
        assert_eq!(ledger.residual(si(0)), Capacity::new(8, 8, 8));

        ledger.reset_allocation(ji(0));
        assert_eq!(ledger.price(ji(0)), 0);
    }
}
