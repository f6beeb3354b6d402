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

//! # Feasibility Oracle and Speed Policies
//!
//! Answers two questions about a job against a residual capacity:
//!
//! 1. Existence (O(1)): can the job meet its deadline at all? The deadline
//!    inequality is monotone in every speed, so it suffices to test the
//!    maximal triple the residual admits.
//! 2. Materialisation: which concrete speed triple should the engine
//!    allocate? A `SpeedPolicy` enumerates loading and compute speeds within
//!    the residual, derives the minimal sending speed per pair by exact
//!    ceiling division, and keeps the candidate with the lowest policy cost.
//!
//! Shipped policies: `WeightedSumSpeeds` (default, unit weights) minimises
//! the weighted sum of speeds; `SumSpeedCubes` minimises the sum of cubed
//! speeds, an energy-style objective.
//!
//! `BindingConstraints` names the resources that block an infeasible job for
//! diagnostics.

use flexalloc_model::{
    capacity::{Capacity, SpeedTriple},
    index::JobIndex,
    ledger::deadline_holds,
    model::Model,
};
use flexalloc_search::num::SolverNumeric;

/// Returns `true` if the job can meet its deadline on the given residual
/// capacity at some admissible speed triple.
///
/// The deadline inequality only improves when any speed grows, so the
/// maximal triple `(R.storage, R.computation, R.bandwidth)` decides
/// existence in O(1).
///
/// # Panics
///
/// Panics if `job_index` is out of bounds.
#[inline]
pub fn can_run<T>(model: &Model<T>, job_index: JobIndex, residual: &Capacity<T>) -> bool
where
    T: SolverNumeric,
{
    let maximal = residual.maximal_speeds();
    if !maximal.is_valid() {
        return false;
    }

    deadline_holds(
        model.job_storage(job_index),
        model.job_computation(job_index),
        model.job_results_data(job_index),
        model.job_deadline(job_index),
        &maximal,
    )
}

/// The resources that bound an infeasible job on a residual capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindingConstraints {
    /// No storage left to host a loading speed of at least one.
    pub storage: bool,
    /// No computation left to host a compute speed of at least one.
    pub computation: bool,
    /// No bandwidth left to host a sending speed of at least one.
    pub bandwidth: bool,
    /// Speeds exist but the deadline cannot be met even at the maximal triple.
    pub deadline: bool,
}

impl BindingConstraints {
    /// Diagnoses why `job_index` cannot run on `residual`. All flags are
    /// `false` when the job is feasible.
    pub fn diagnose<T>(model: &Model<T>, job_index: JobIndex, residual: &Capacity<T>) -> Self
    where
        T: SolverNumeric,
    {
        let one = T::one();
        let storage = residual.storage < one;
        let computation = residual.computation < one;
        let bandwidth = residual.bandwidth < one;

        let deadline = if storage || computation || bandwidth {
            false
        } else {
            !can_run(model, job_index, residual)
        };

        Self {
            storage,
            computation,
            bandwidth,
            deadline,
        }
    }

    /// Returns `true` if any constraint binds.
    #[inline]
    pub fn any(&self) -> bool {
        self.storage || self.computation || self.bandwidth || self.deadline
    }
}

impl std::fmt::Display for BindingConstraints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.any() {
            return write!(f, "none");
        }
        let mut first = true;
        let mut put = |f: &mut std::fmt::Formatter<'_>, name: &str| -> std::fmt::Result {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{}", name)
        };
        if self.storage {
            put(f, "storage")?;
        }
        if self.computation {
            put(f, "computation")?;
        }
        if self.bandwidth {
            put(f, "bandwidth")?;
        }
        if self.deadline {
            put(f, "deadline")?;
        }
        Ok(())
    }
}

/// Validates a prescribed speed triple against a job and a residual capacity.
/// Checks positivity, the deadline inequality and the component-wise fit.
///
/// # Panics
///
/// Panics if `job_index` is out of bounds.
#[inline]
pub fn validate_fixed_speeds<T>(
    model: &Model<T>,
    job_index: JobIndex,
    residual: &Capacity<T>,
    speeds: &SpeedTriple<T>,
) -> bool
where
    T: SolverNumeric,
{
    speeds.is_valid()
        && residual.fits(speeds)
        && deadline_holds(
            model.job_storage(job_index),
            model.job_computation(job_index),
            model.job_results_data(job_index),
            model.job_deadline(job_index),
            speeds,
        )
}

/// A strategy for picking the speed triple a job is allocated at.
///
/// The engine materialises one triple per feasible (job, server) pair; the
/// policy decides which of the admissible triples it prefers. Lower cost
/// wins, and on cost ties the enumeration order wins (smaller loading
/// speed, then smaller compute speed).
pub trait SpeedPolicy<T>
where
    T: SolverNumeric,
{
    /// Returns the name of the speed policy.
    fn name(&self) -> &str;

    /// Cost of an admissible triple. Lower is better. Implementations
    /// saturate instead of overflowing.
    fn cost(&self, speeds: &SpeedTriple<T>) -> T;

    /// Picks the cheapest feasible triple for `job_index` on `residual`,
    /// or `None` if the job cannot meet its deadline there.
    ///
    /// The default implementation enumerates `l` over `1..=residual.storage`
    /// and `c` over `1..=residual.computation`, derives the minimal sending
    /// speed for each pair by exact ceiling division, and re-checks the
    /// candidate with the shared deadline predicate so that enumeration and
    /// allocation can never disagree.
    fn select_speeds(
        &self,
        model: &Model<T>,
        job_index: JobIndex,
        residual: &Capacity<T>,
    ) -> Option<SpeedTriple<T>> {
        if !can_run(model, job_index, residual) {
            return None;
        }

        let storage = model.job_storage(job_index);
        let computation = model.job_computation(job_index);
        let results_data = model.job_results_data(job_index);
        let deadline = model.job_deadline(job_index);
        let maximal = residual.maximal_speeds();
        let (max_loading, max_compute, max_sending) =
            (maximal.loading, maximal.compute, maximal.sending);

        let one = T::one();
        let mut best: Option<(T, SpeedTriple<T>)> = None;

        let mut loading = one;
        while loading <= max_loading {
            let mut compute = one;
            while compute <= max_compute {
                if let Some(sending) = minimal_sending_speed(
                    storage,
                    computation,
                    results_data,
                    deadline,
                    loading,
                    compute,
                    max_sending,
                ) {
                    let candidate = SpeedTriple::new(loading, compute, sending);
                    debug_assert!(
                        deadline_holds(storage, computation, results_data, deadline, &candidate),
                        "minimal sending speed does not satisfy the deadline"
                    );
                    let cost = self.cost(&candidate);
                    let better = match &best {
                        Some((best_cost, _)) => cost < *best_cost,
                        None => true,
                    };
                    if better {
                        best = Some((cost, candidate));
                    }
                }
                compute = compute + one;
            }
            loading = loading + one;
        }

        best.map(|(_, speeds)| speeds)
    }
}

impl<T> std::fmt::Debug for dyn SpeedPolicy<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpeedPolicy({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SpeedPolicy<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpeedPolicy({})", self.name())
    }
}

/// The minimal sending speed `s` with `1 <= s <= max_sending` satisfying the
/// deadline inequality for the fixed `(loading, compute)` pair, or `None`.
///
/// Rearranging `storage*c*s + l*computation*s + l*c*results <= deadline*l*c*s`
/// gives `s * (deadline*l*c - storage*c - l*computation) >= l*c*results`.
/// The slack factor must be positive; the minimal `s` is then the exact
/// ceiling of `l*c*results / slack`. Any overflow on the way means the pair
/// is unusable.
#[inline]
fn minimal_sending_speed<T>(
    storage: T,
    computation: T,
    results_data: T,
    deadline: T,
    loading: T,
    compute: T,
    max_sending: T,
) -> Option<T>
where
    T: SolverNumeric,
{
    let lc = loading.checked_mul_val(compute)?;
    let budget = deadline.checked_mul_val(lc)?;
    let load_term = storage.checked_mul_val(compute)?;
    let compute_term = loading.checked_mul_val(computation)?;
    let slack = budget
        .checked_sub_val(load_term)?
        .checked_sub_val(compute_term)?;
    if slack <= T::zero() {
        return None;
    }

    let demand = lc.checked_mul_val(results_data)?;
    // Exact ceiling division: (demand + slack - 1) / slack.
    let numerator = demand.checked_add_val(slack)?.checked_sub_val(T::one())?;
    let sending = numerator / slack;

    let sending = sending.max(T::one());
    if sending > max_sending {
        return None;
    }
    Some(sending)
}

/// Minimises the weighted sum of the three speeds. Unit weights by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedSumSpeeds<T> {
    pub loading_weight: T,
    pub compute_weight: T,
    pub sending_weight: T,
}

impl<T> Default for WeightedSumSpeeds<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new(T::one(), T::one(), T::one())
    }
}

impl<T> WeightedSumSpeeds<T> {
    /// Creates a policy with explicit per-speed weights.
    #[inline]
    pub fn new(loading_weight: T, compute_weight: T, sending_weight: T) -> Self {
        Self {
            loading_weight,
            compute_weight,
            sending_weight,
        }
    }
}

impl<T> SpeedPolicy<T> for WeightedSumSpeeds<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "WeightedSumSpeeds"
    }

    #[inline]
    fn cost(&self, speeds: &SpeedTriple<T>) -> T {
        self.loading_weight
            .saturating_mul_val(speeds.loading)
            .saturating_add_val(self.compute_weight.saturating_mul_val(speeds.compute))
            .saturating_add_val(self.sending_weight.saturating_mul_val(speeds.sending))
    }
}

/// Minimises the sum of cubed speeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SumSpeedCubes;

impl SumSpeedCubes {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<T> SpeedPolicy<T> for SumSpeedCubes
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "SumSpeedCubes"
    }

    #[inline]
    fn cost(&self, speeds: &SpeedTriple<T>) -> T {
        let cube = |x: T| x.saturating_mul_val(x).saturating_mul_val(x);
        cube(speeds.loading)
            .saturating_add_val(cube(speeds.compute))
            .saturating_add_val(cube(speeds.sending))
    }
}
