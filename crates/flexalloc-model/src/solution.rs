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

use crate::{
    capacity::SpeedTriple,
    index::{JobIndex, ServerIndex},
    ledger::AllocationLedger,
    model::Model,
};
use flexalloc_core::num::ops::{
    checked_arithmetic::{CheckedAddVal, CheckedMulVal},
    saturating_arithmetic::SaturatingAddVal,
};
use num_traits::{PrimInt, Signed};

/// A frozen, complete allocation.
///
/// Structure of Arrays layout indexed by `JobIndex`: `servers[j]` is the
/// server running job `j` (`None` when the job was rejected), and the three
/// speed vectors and the price vector carry the per-job allocation details.
/// Speed and price entries of rejected jobs are zero and carry no meaning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<T> {
    /// The total value (social welfare) of the accepted jobs.
    total_value: T,

    /// The server for each job, or `None` for rejected jobs.
    servers: Vec<Option<ServerIndex>>,

    /// The loading speed for each job.
    loading_speeds: Vec<T>,

    /// The compute speed for each job.
    compute_speeds: Vec<T>,

    /// The sending speed for each job.
    sending_speeds: Vec<T>,

    /// The price charged for each job.
    prices: Vec<T>,
}

impl<T> Solution<T>
where
    T: PrimInt + Signed + Copy,
{
    /// Constructs a new `Solution`.
    ///
    /// # Panics
    ///
    /// Panics if the vectors have different lengths.
    pub fn new(
        total_value: T,
        servers: Vec<Option<ServerIndex>>,
        loading_speeds: Vec<T>,
        compute_speeds: Vec<T>,
        sending_speeds: Vec<T>,
        prices: Vec<T>,
    ) -> Self {
        let len = servers.len();
        assert!(
            loading_speeds.len() == len
                && compute_speeds.len() == len
                && sending_speeds.len() == len
                && prices.len() == len,
            "called Solution::new with inconsistent vector lengths: servers.len() = {}, speeds.len() = ({}, {}, {}), prices.len() = {}",
            len,
            loading_speeds.len(),
            compute_speeds.len(),
            sending_speeds.len(),
            prices.len()
        );

        Self {
            total_value,
            servers,
            loading_speeds,
            compute_speeds,
            sending_speeds,
            prices,
        }
    }

    /// Freezes the current state of a ledger into a solution.
    pub fn from_ledger(model: &Model<T>, ledger: &AllocationLedger<T>) -> Self
    where
        T: CheckedAddVal + CheckedMulVal + SaturatingAddVal,
    {
        let num_jobs = ledger.num_jobs();
        let mut servers = Vec::with_capacity(num_jobs);
        let mut loading_speeds = Vec::with_capacity(num_jobs);
        let mut compute_speeds = Vec::with_capacity(num_jobs);
        let mut sending_speeds = Vec::with_capacity(num_jobs);
        let mut prices = Vec::with_capacity(num_jobs);

        for job in 0..num_jobs {
            let job_index = JobIndex::new(job);
            match ledger.assignment(job_index) {
                Some(assignment) => {
                    let speeds = assignment.speeds();
                    servers.push(Some(assignment.server()));
                    loading_speeds.push(speeds.loading);
                    compute_speeds.push(speeds.compute);
                    sending_speeds.push(speeds.sending);
                    prices.push(ledger.price(job_index));
                }
                None => {
                    servers.push(None);
                    loading_speeds.push(T::zero());
                    compute_speeds.push(T::zero());
                    sending_speeds.push(T::zero());
                    prices.push(T::zero());
                }
            }
        }

        Self::new(
            ledger.assigned_value(model),
            servers,
            loading_speeds,
            compute_speeds,
            sending_speeds,
            prices,
        )
    }

    /// Returns the server assigned to a job, or `None` if it was rejected.
    ///
    /// # Panics
    ///
    /// Panics if `job_index` is out of bounds.
    #[inline]
    pub fn server_for_job(&self, job_index: JobIndex) -> Option<ServerIndex> {
        let index = job_index.get();
        debug_assert!(
            index < self.num_jobs(),
            "called `Solution::server_for_job` with job index out of bounds: the len is {} but the index is {}",
            self.num_jobs(),
            index
        );

        self.servers[index]
    }

    /// Returns the speed triple of an assigned job, or `None` if it was
    /// rejected.
    #[inline]
    pub fn speeds_for_job(&self, job_index: JobIndex) -> Option<SpeedTriple<T>> {
        let index = job_index.get();
        debug_assert!(
            index < self.num_jobs(),
            "called `Solution::speeds_for_job` with job index out of bounds: the len is {} but the index is {}",
            self.num_jobs(),
            index
        );

        self.servers[index].map(|_| {
            SpeedTriple::new(
                self.loading_speeds[index],
                self.compute_speeds[index],
                self.sending_speeds[index],
            )
        })
    }

    /// Returns the price charged for a job.
    #[inline]
    pub fn price_for_job(&self, job_index: JobIndex) -> T {
        let index = job_index.get();
        debug_assert!(
            index < self.num_jobs(),
            "called `Solution::price_for_job` with job index out of bounds: the len is {} but the index is {}",
            self.num_jobs(),
            index
        );

        self.prices[index]
    }

    /// Returns the number of jobs in this solution.
    #[inline]
    pub fn num_jobs(&self) -> usize {
        self.servers.len()
    }

    /// Returns the number of accepted jobs.
    #[inline]
    pub fn num_assigned(&self) -> usize {
        self.servers.iter().filter(|s| s.is_some()).count()
    }

    /// Returns the total value (social welfare) of this solution.
    #[inline]
    pub fn total_value(&self) -> T {
        self.total_value
    }

    /// Returns a slice of the per-job server assignments.
    #[inline]
    pub fn servers(&self) -> &[Option<ServerIndex>] {
        &self.servers
    }
}

impl<T> std::fmt::Display for Solution<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Allocation Summary")?;
        writeln!(f, "   Social Welfare: {}", self.total_value)?;
        writeln!(f)?;

        if self.num_jobs() == 0 {
            writeln!(f, "   (No jobs)")?;
            return Ok(());
        }

        writeln!(
            f,
            "   {:<6} | {:<8} | {:<8} | {:<8} | {:<8} | {:<8}",
            "Job", "Server", "Load", "Compute", "Send", "Price"
        )?;
        writeln!(
            f,
            "   {:-<6}-+-{:-<8}-+-{:-<8}-+-{:-<8}-+-{:-<8}-+-{:-<8}",
            "", "", "", "", "", ""
        )?;
        for job in 0..self.num_jobs() {
            match self.servers[job] {
                Some(server) => writeln!(
                    f,
                    "   {:<6} | {:<8} | {:<8} | {:<8} | {:<8} | {:<8}",
                    job,
                    server.get(),
                    self.loading_speeds[job],
                    self.compute_speeds[job],
                    self.sending_speeds[job],
                    self.prices[job]
                )?,
                None => writeln!(
                    f,
                    "   {:<6} | {:<8} | {:<8} | {:<8} | {:<8} | {:<8}",
                    job, "-", "-", "-", "-", "-"
                )?,
            }
        }

        Ok(())
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

    #[test]
    fn test_new_and_accessors() {
        let sol = Solution::new(
            14i64,
            vec![Some(si(0)), None, Some(si(1))],
            vec![1, 0, 2],
            vec![3, 0, 4],
            vec![5, 0, 6],
            vec![0, 0, 7],
        );

        assert_eq!(sol.total_value(), 14);
        assert_eq!(sol.num_jobs(), 3);
        assert_eq!(sol.num_assigned(), 2);
        assert_eq!(sol.server_for_job(ji(0)), Some(si(0)));
        assert_eq!(sol.server_for_job(ji(1)), None);
        assert_eq!(sol.speeds_for_job(ji(2)), Some(SpeedTriple::new(2, 4, 6)));
        assert_eq!(sol.speeds_for_job(ji(1)), None);
        assert_eq!(sol.price_for_job(ji(2)), 7);
    }

    #[test]
    #[should_panic(expected = "called Solution::new with inconsistent vector lengths")]
    fn test_new_panics_on_length_mismatch() {
        let _ = Solution::new(
            0i64,
            vec![None, None],
            vec![0],
            vec![0, 0],
            vec![0, 0],
            vec![0, 0],
        );
    }

    #[test]
    fn test_empty_solution_is_valid() {
        let sol = Solution::<i64>::new(0, Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new());
        assert_eq!(sol.total_value(), 0);
        assert_eq!(sol.num_jobs(), 0);
        assert_eq!(sol.num_assigned(), 0);
    }

    #[test]
    fn test_from_ledger() {
        let mut builder = ModelBuilder::<i64>::new(2, 1);
        builder.set_job_requirements(ji(0), 2, 2, 2);
        builder.set_job_value(ji(0), 10);
        builder.set_job_deadline(ji(0), 3);
        builder.set_server_capacities(si(0), 8, 8, 8);
        let model = builder.build();

        let mut ledger = AllocationLedger::new(&model);
        ledger
            .allocate(&model, ji(0), si(0), SpeedTriple::new(3, 3, 3), 2)
            .unwrap();

        let sol = Solution::from_ledger(&model, &ledger);
        assert_eq!(sol.total_value(), 10);
        assert_eq!(sol.server_for_job(ji(0)), Some(si(0)));
        assert_eq!(sol.speeds_for_job(ji(0)), Some(SpeedTriple::new(3, 3, 3)));
        assert_eq!(sol.price_for_job(ji(0)), 2);
        assert_eq!(sol.server_for_job(ji(1)), None);
    }

    #[test]
    fn test_display_contains_table() {
        let sol = Solution::new(
            5i64,
            vec![Some(si(0)), None],
            vec![1, 0],
            vec![2, 0],
            vec![3, 0],
            vec![0, 0],
        );
        let displayed = format!("{}", sol);
        assert!(displayed.contains("Social Welfare: 5"));
        assert!(displayed.contains("Job"));
        assert!(displayed.contains("-"));
    }
}
