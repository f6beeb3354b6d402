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

//! # Problem Model
//!
//! The immutable description of a flexible resource allocation instance:
//! jobs with requirements, values and deadlines, and servers with capacities.
//! Data is stored in a Structure of Arrays layout and indexed by `JobIndex`
//! and `ServerIndex`.
//!
//! ## Construction
//!
//! `Model` is only obtainable through `ModelBuilder`, which validates
//! eagerly: indices are checked on every setter, domain values (positive
//! requirements, positive deadlines, positive capacities, non-negative
//! values) are asserted when set, and entity names must be unique at
//! `build` time.
//!
//! Builder defaults per entity:
//!
//! | Field | Default |
//! |---|---|
//! | job name | `"job<i>"` |
//! | required storage / computation / results data | `1` |
//! | value | `0` |
//! | deadline | `1` |
//! | server name | `"server<i>"` |
//! | server capacities | `1` each |
//!
//! ## Usage
//!
//! ```rust
//! use flexalloc_model::{index::JobIndex, index::ServerIndex, model::ModelBuilder};
//!
//! let mut builder = ModelBuilder::<i64>::new(2, 1);
//! builder.set_job_requirements(JobIndex::new(0), 2, 2, 2);
//! builder.set_job_value(JobIndex::new(0), 10);
//! builder.set_job_deadline(JobIndex::new(0), 3);
//! builder.set_server_capacities(ServerIndex::new(0), 8, 8, 8);
//! let model = builder.build();
//! assert_eq!(model.num_jobs(), 2);
//! assert_eq!(model.num_servers(), 1);
//! ```

use crate::{
    capacity::Capacity,
    index::{JobIndex, ServerIndex},
};
use flexalloc_core::num::ops::saturating_arithmetic::SaturatingAddVal;
use num_traits::{PrimInt, Signed};
use rustc_hash::FxHashMap;

/// The theoretical search tree size for an allocation instance.
///
/// Deciding job `k` branches into at most `M + 1` children (one per server
/// plus rejection), so level `k` holds `(M + 1)^k` nodes and the full tree
/// holds their sum over `k = 0..=N`. The value is stored in log10 space
/// since it overflows any integer type for realistic instances.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Complexity {
    log_val: f64,
}

impl Complexity {
    /// Calculates the complexity for a given number of jobs and servers.
    pub fn new(num_jobs: usize, num_servers: usize) -> Self {
        if num_jobs == 0 {
            return Complexity { log_val: 0.0 };
        }

        let branching_log = ((num_servers + 1) as f64).log10();

        // log10(10^a + 10^b) without leaving log space.
        let log10_add = |a: f64, b: f64| -> f64 {
            let max = a.max(b);
            let min = a.min(b);
            max + (1.0 + 10.0_f64.powf(min - max)).log10()
        };

        let mut current_level_log = 0.0;
        let mut total_sum_log = 0.0;
        for _ in 1..=num_jobs {
            current_level_log += branching_log;
            total_sum_log = log10_add(total_sum_log, current_level_log);
        }

        Complexity {
            log_val: total_sum_log,
        }
    }

    /// Returns the percentage of the search space that was actually explored.
    /// Returns `None` if the space size degenerates to zero.
    pub fn coverage(&self, nodes_explored: u64) -> Option<f64> {
        if self.log_val > 15.0 {
            return Some(0.0);
        }

        let total_size = 10.0_f64.powf(self.log_val);
        if total_size == 0.0 {
            return None;
        }

        Some((nodes_explored as f64 / total_size) * 100.0)
    }

    /// Returns the order of magnitude of the search space size.
    #[inline]
    pub fn exponent(&self) -> u64 {
        self.log_val.floor() as u64
    }

    /// Returns the mantissa of the search space size.
    #[inline]
    pub fn mantissa(&self) -> f64 {
        let fractional_part = self.log_val - self.log_val.floor();
        10.0_f64.powf(fractional_part)
    }

    /// Returns the raw log10 value.
    #[inline]
    pub fn raw(&self) -> f64 {
        self.log_val
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} x 10^{}", self.mantissa(), self.exponent())
    }
}

impl std::fmt::Debug for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Complexity(log10={:.4})", self.log_val)
    }
}

/// The immutable data model describing jobs and servers.
///
/// All vectors are indexed by the entity index:
/// - `job_storage[j]`, `job_computation[j]`, `job_results_data[j]`: the
///   requirements of job `j` (positive).
/// - `job_values[j]`: the value gained when job `j` completes (non-negative).
/// - `job_deadlines[j]`: the time budget of job `j` (positive).
/// - `server_capacities[s]`: the capacity of server `s` (positive per
///   dimension).
///
/// Use `ModelBuilder` to construct a validated `Model`.
#[derive(Clone)]
pub struct Model<T>
where
    T: PrimInt + Signed,
{
    job_names: Vec<String>,
    job_storage: Vec<T>,
    job_computation: Vec<T>,
    job_results_data: Vec<T>,
    job_values: Vec<T>,
    job_deadlines: Vec<T>,
    server_names: Vec<String>,
    server_capacities: Vec<Capacity<T>>,
}

impl<T> Model<T>
where
    T: PrimInt + Signed,
{
    /// Returns the number of jobs in the model.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flexalloc_model::model::ModelBuilder;
    /// let model = ModelBuilder::<i64>::new(3, 5).build();
    /// assert_eq!(model.num_jobs(), 3);
    /// ```
    #[inline]
    pub fn num_jobs(&self) -> usize {
        self.job_values.len()
    }

    /// Returns the number of servers in the model.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flexalloc_model::model::ModelBuilder;
    /// let model = ModelBuilder::<i64>::new(3, 5).build();
    /// assert_eq!(model.num_servers(), 5);
    /// ```
    #[inline]
    pub fn num_servers(&self) -> usize {
        self.server_capacities.len()
    }

    /// Returns the complexity of the model's search space.
    #[inline]
    pub fn complexity(&self) -> Complexity {
        Complexity::new(self.num_jobs(), self.num_servers())
    }

    /// Returns the name of the specified job.
    ///
    /// # Panics
    ///
    /// Panics if `job_index` is not in `0..num_jobs()`.
    #[inline]
    pub fn job_name(&self, job_index: JobIndex) -> &str {
        &self.job_names[job_index.get()]
    }

    /// Returns the storage requirement of the specified job.
    #[inline]
    pub fn job_storage(&self, job_index: JobIndex) -> T {
        let index = job_index.get();
        debug_assert!(
            index < self.num_jobs(),
            "called `Model::job_storage` with job index out of bounds: the len is {} but the index is {}",
            self.num_jobs(),
            index
        );

        self.job_storage[index]
    }

    /// Returns the computation requirement of the specified job.
    #[inline]
    pub fn job_computation(&self, job_index: JobIndex) -> T {
        let index = job_index.get();
        debug_assert!(
            index < self.num_jobs(),
            "called `Model::job_computation` with job index out of bounds: the len is {} but the index is {}",
            self.num_jobs(),
            index
        );

        self.job_computation[index]
    }

    /// Returns the results-data requirement of the specified job.
    #[inline]
    pub fn job_results_data(&self, job_index: JobIndex) -> T {
        let index = job_index.get();
        debug_assert!(
            index < self.num_jobs(),
            "called `Model::job_results_data` with job index out of bounds: the len is {} but the index is {}",
            self.num_jobs(),
            index
        );

        self.job_results_data[index]
    }

    /// Returns the value of the specified job.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flexalloc_model::{index::JobIndex, model::ModelBuilder};
    /// let mut builder = ModelBuilder::<i64>::new(2, 1);
    /// builder.set_job_value(JobIndex::new(1), 42);
    /// let model = builder.build();
    /// assert_eq!(model.job_value(JobIndex::new(1)), 42);
    /// ```
    #[inline]
    pub fn job_value(&self, job_index: JobIndex) -> T {
        let index = job_index.get();
        debug_assert!(
            index < self.num_jobs(),
            "called `Model::job_value` with job index out of bounds: the len is {} but the index is {}",
            self.num_jobs(),
            index
        );

        self.job_values[index]
    }

    /// Returns the value of the specified job without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `job_index` is in `0..num_jobs()`.
    /// Undefined behavior may occur if this precondition is violated.
    #[inline]
    pub unsafe fn job_value_unchecked(&self, job_index: JobIndex) -> T {
        let index = job_index.get();
        debug_assert!(
            index < self.num_jobs(),
            "called `Model::job_value_unchecked` with job index out of bounds: the len is {} but the index is {}",
            self.num_jobs(),
            index
        );

        unsafe { *self.job_values.get_unchecked(index) }
    }

    /// Returns the deadline of the specified job.
    #[inline]
    pub fn job_deadline(&self, job_index: JobIndex) -> T {
        let index = job_index.get();
        debug_assert!(
            index < self.num_jobs(),
            "called `Model::job_deadline` with job index out of bounds: the len is {} but the index is {}",
            self.num_jobs(),
            index
        );

        self.job_deadlines[index]
    }

    /// Returns the name of the specified server.
    ///
    /// # Panics
    ///
    /// Panics if `server_index` is not in `0..num_servers()`.
    #[inline]
    pub fn server_name(&self, server_index: ServerIndex) -> &str {
        &self.server_names[server_index.get()]
    }

    /// Returns the capacity of the specified server.
    #[inline]
    pub fn server_capacity(&self, server_index: ServerIndex) -> Capacity<T> {
        let index = server_index.get();
        debug_assert!(
            index < self.num_servers(),
            "called `Model::server_capacity` with server index out of bounds: the len is {} but the index is {}",
            self.num_servers(),
            index
        );

        self.server_capacities[index]
    }

    /// Returns a slice of all job values.
    #[inline]
    pub fn job_values(&self) -> &[T] {
        &self.job_values
    }

    /// Returns a slice of all job deadlines.
    #[inline]
    pub fn job_deadlines(&self) -> &[T] {
        &self.job_deadlines
    }

    /// Returns a slice of all server capacities.
    #[inline]
    pub fn server_capacities(&self) -> &[Capacity<T>] {
        &self.server_capacities
    }

    /// Returns the aggregate capacity of all servers combined.
    ///
    /// This is the relaxation target for bound computation: a single super
    /// server holding the component-wise (saturating) sum of every real
    /// server's capacity. It never appears in a returned allocation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flexalloc_model::{index::ServerIndex, model::ModelBuilder};
    /// let mut builder = ModelBuilder::<i64>::new(1, 2);
    /// builder.set_server_capacities(ServerIndex::new(0), 4, 5, 6);
    /// builder.set_server_capacities(ServerIndex::new(1), 1, 2, 3);
    /// let model = builder.build();
    /// let aggregate = model.aggregate_capacity();
    /// assert_eq!(aggregate.storage, 5);
    /// assert_eq!(aggregate.computation, 7);
    /// assert_eq!(aggregate.bandwidth, 9);
    /// ```
    pub fn aggregate_capacity(&self) -> Capacity<T>
    where
        T: SaturatingAddVal,
    {
        let mut aggregate = Capacity::new(T::zero(), T::zero(), T::zero());
        for capacity in &self.server_capacities {
            aggregate = aggregate.saturating_add(capacity);
        }
        aggregate
    }
}

impl<T> std::fmt::Debug for Model<T>
where
    T: PrimInt + Signed + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("job_names", &self.job_names)
            .field("job_storage", &self.job_storage)
            .field("job_computation", &self.job_computation)
            .field("job_results_data", &self.job_results_data)
            .field("job_values", &self.job_values)
            .field("job_deadlines", &self.job_deadlines)
            .field("server_names", &self.server_names)
            .field("server_capacities", &self.server_capacities)
            .finish()
    }
}

impl<T> std::fmt::Display for Model<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Model(num_jobs: {}, num_servers: {})",
            self.num_jobs(),
            self.num_servers()
        )
    }
}

/// A fail-fast builder for `Model`.
///
/// Every job and server starts from the minimal defaults listed in the
/// module docs; setters validate indices and value domains immediately so a
/// malformed instance is rejected at the call site rather than deep inside
/// the search.
#[derive(Clone)]
pub struct ModelBuilder<T>
where
    T: PrimInt + Signed,
{
    job_names: Vec<String>,
    job_storage: Vec<T>,
    job_computation: Vec<T>,
    job_results_data: Vec<T>,
    job_values: Vec<T>,
    job_deadlines: Vec<T>,
    server_names: Vec<String>,
    server_capacities: Vec<Capacity<T>>,
}

impl<T> ModelBuilder<T>
where
    T: PrimInt + Signed,
{
    /// Creates a builder for `num_jobs` jobs and `num_servers` servers with
    /// default fields.
    pub fn new(num_jobs: usize, num_servers: usize) -> Self {
        Self {
            job_names: (0..num_jobs).map(|i| format!("job{}", i)).collect(),
            job_storage: vec![T::one(); num_jobs],
            job_computation: vec![T::one(); num_jobs],
            job_results_data: vec![T::one(); num_jobs],
            job_values: vec![T::zero(); num_jobs],
            job_deadlines: vec![T::one(); num_jobs],
            server_names: (0..num_servers).map(|i| format!("server{}", i)).collect(),
            server_capacities: vec![Capacity::new(T::one(), T::one(), T::one()); num_servers],
        }
    }

    /// Sets the name of a job.
    ///
    /// # Panics
    ///
    /// Panics if `job_index` is out of bounds.
    pub fn set_job_name(&mut self, job_index: JobIndex, name: impl Into<String>) -> &mut Self {
        let index = job_index.get();
        assert!(
            index < self.job_names.len(),
            "called `ModelBuilder::set_job_name` with job index out of bounds: the len is {} but the index is {}",
            self.job_names.len(),
            index
        );

        self.job_names[index] = name.into();
        self
    }

    /// Sets the three requirements of a job.
    ///
    /// # Panics
    ///
    /// Panics if `job_index` is out of bounds or any requirement is not
    /// strictly positive.
    pub fn set_job_requirements(
        &mut self,
        job_index: JobIndex,
        storage: T,
        computation: T,
        results_data: T,
    ) -> &mut Self {
        let index = job_index.get();
        assert!(
            index < self.job_storage.len(),
            "called `ModelBuilder::set_job_requirements` with job index out of bounds: the len is {} but the index is {}",
            self.job_storage.len(),
            index
        );
        assert!(
            storage > T::zero() && computation > T::zero() && results_data > T::zero(),
            "called `ModelBuilder::set_job_requirements` with a non-positive requirement"
        );

        self.job_storage[index] = storage;
        self.job_computation[index] = computation;
        self.job_results_data[index] = results_data;
        self
    }

    /// Sets the value of a job.
    ///
    /// # Panics
    ///
    /// Panics if `job_index` is out of bounds or the value is negative.
    pub fn set_job_value(&mut self, job_index: JobIndex, value: T) -> &mut Self {
        let index = job_index.get();
        assert!(
            index < self.job_values.len(),
            "called `ModelBuilder::set_job_value` with job index out of bounds: the len is {} but the index is {}",
            self.job_values.len(),
            index
        );
        assert!(
            value >= T::zero(),
            "called `ModelBuilder::set_job_value` with a negative value"
        );

        self.job_values[index] = value;
        self
    }

    /// Sets the deadline of a job.
    ///
    /// # Panics
    ///
    /// Panics if `job_index` is out of bounds or the deadline is not
    /// strictly positive.
    pub fn set_job_deadline(&mut self, job_index: JobIndex, deadline: T) -> &mut Self {
        let index = job_index.get();
        assert!(
            index < self.job_deadlines.len(),
            "called `ModelBuilder::set_job_deadline` with job index out of bounds: the len is {} but the index is {}",
            self.job_deadlines.len(),
            index
        );
        assert!(
            deadline > T::zero(),
            "called `ModelBuilder::set_job_deadline` with a non-positive deadline"
        );

        self.job_deadlines[index] = deadline;
        self
    }

    /// Sets the name of a server.
    ///
    /// # Panics
    ///
    /// Panics if `server_index` is out of bounds.
    pub fn set_server_name(
        &mut self,
        server_index: ServerIndex,
        name: impl Into<String>,
    ) -> &mut Self {
        let index = server_index.get();
        assert!(
            index < self.server_names.len(),
            "called `ModelBuilder::set_server_name` with server index out of bounds: the len is {} but the index is {}",
            self.server_names.len(),
            index
        );

        self.server_names[index] = name.into();
        self
    }

    /// Sets the three capacities of a server.
    ///
    /// # Panics
    ///
    /// Panics if `server_index` is out of bounds or any capacity is not
    /// strictly positive.
    pub fn set_server_capacities(
        &mut self,
        server_index: ServerIndex,
        storage: T,
        computation: T,
        bandwidth: T,
    ) -> &mut Self {
        let index = server_index.get();
        assert!(
            index < self.server_capacities.len(),
            "called `ModelBuilder::set_server_capacities` with server index out of bounds: the len is {} but the index is {}",
            self.server_capacities.len(),
            index
        );
        assert!(
            storage > T::zero() && computation > T::zero() && bandwidth > T::zero(),
            "called `ModelBuilder::set_server_capacities` with a non-positive capacity"
        );

        self.server_capacities[index] = Capacity::new(storage, computation, bandwidth);
        self
    }

    /// Builds the validated, immutable `Model`.
    ///
    /// # Panics
    ///
    /// Panics if two jobs or two servers share a name.
    pub fn build(self) -> Model<T> {
        let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
        for (i, name) in self.job_names.iter().enumerate() {
            if let Some(previous) = seen.insert(name.as_str(), i) {
                panic!(
                    "called `ModelBuilder::build` with duplicate job name {:?} (jobs {} and {})",
                    name, previous, i
                );
            }
        }

        seen.clear();
        for (i, name) in self.server_names.iter().enumerate() {
            if let Some(previous) = seen.insert(name.as_str(), i) {
                panic!(
                    "called `ModelBuilder::build` with duplicate server name {:?} (servers {} and {})",
                    name, previous, i
                );
            }
        }

        Model {
            job_names: self.job_names,
            job_storage: self.job_storage,
            job_computation: self.job_computation,
            job_results_data: self.job_results_data,
            job_values: self.job_values,
            job_deadlines: self.job_deadlines,
            server_names: self.server_names,
            server_capacities: self.server_capacities,
        }
    }
}
