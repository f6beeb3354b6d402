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

//! Pre-committed speed triples for fixed-speed comparison runs.
//!
//! A fixed-speed run decides each job's speeds once, up front, against the
//! aggregate capacity of the whole fleet, and the search may then only
//! accept or reject a job at exactly that triple. This models deployments
//! where transfer and compute rates are negotiated before placement.

use crate::feasibility::SpeedPolicy;
use flexalloc_model::{capacity::SpeedTriple, index::JobIndex, model::Model};
use flexalloc_search::num::SolverNumeric;

/// One pre-committed speed triple per job, `None` for jobs the policy found
/// infeasible on the aggregate capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSpeedTable<T> {
    speeds: Vec<Option<SpeedTriple<T>>>,
}

impl<T> FixedSpeedTable<T>
where
    T: SolverNumeric,
{
    /// Runs `policy` once per job against the model's aggregate capacity
    /// and records the chosen triples.
    pub fn from_policy(model: &Model<T>, policy: &dyn SpeedPolicy<T>) -> Self {
        let aggregate = model.aggregate_capacity();
        let speeds = (0..model.num_jobs())
            .map(|job| policy.select_speeds(model, JobIndex::new(job), &aggregate))
            .collect();
        Self { speeds }
    }

    /// The pre-committed triple for a job, or `None` if the policy deemed
    /// the job infeasible.
    ///
    /// # Panics
    ///
    /// Panics if `job_index` is out of bounds.
    #[inline]
    pub fn speeds_for(&self, job_index: JobIndex) -> Option<SpeedTriple<T>> {
        let index = job_index.get();
        debug_assert!(
            index < self.speeds.len(),
            "called `FixedSpeedTable::speeds_for` with job index out of bounds: the len is {} but the index is {}",
            self.speeds.len(),
            index
        );

        self.speeds[index]
    }

    /// Returns the number of jobs covered by the table.
    #[inline]
    pub fn num_jobs(&self) -> usize {
        self.speeds.len()
    }
}

#[cfg(test)]
mod tests {
    use super::FixedSpeedTable;
    use crate::feasibility::WeightedSumSpeeds;
    use flexalloc_model::{
        index::{JobIndex, ServerIndex},
        ledger::deadline_holds,
        model::ModelBuilder,
    };

    type IntegerType = i64;

    fn ji(i: usize) -> JobIndex {
        JobIndex::new(i)
    }

    #[test]
    fn test_table_covers_every_job() {
        let mut builder = ModelBuilder::<IntegerType>::new(2, 2);
        builder
            .set_job_requirements(ji(0), 2, 2, 2)
            .set_job_deadline(ji(0), 3)
            .set_job_requirements(ji(1), 1, 1, 1)
            .set_job_deadline(ji(1), 2)
            .set_server_capacities(ServerIndex::new(0), 3, 3, 3)
            .set_server_capacities(ServerIndex::new(1), 2, 2, 2);
        let model = builder.build();

        let policy = WeightedSumSpeeds::<IntegerType>::default();
        let table = FixedSpeedTable::from_policy(&model, &policy);

        assert_eq!(table.num_jobs(), 2);
        let first = table.speeds_for(ji(0)).unwrap();
        assert!(deadline_holds(2, 2, 2, 3, &first));
        let second = table.speeds_for(ji(1)).unwrap();
        assert!(deadline_holds(1, 1, 1, 2, &second));
    }

    #[test]
    fn test_infeasible_job_gets_no_entry() {
        let mut builder = ModelBuilder::<IntegerType>::new(1, 1);
        builder
            .set_job_requirements(ji(0), 100, 100, 100)
            .set_job_deadline(ji(0), 1)
            .set_server_capacities(ServerIndex::new(0), 3, 3, 3);
        let model = builder.build();

        let policy = WeightedSumSpeeds::<IntegerType>::default();
        let table = FixedSpeedTable::from_policy(&model, &policy);

        assert!(table.speeds_for(ji(0)).is_none());
    }
}
