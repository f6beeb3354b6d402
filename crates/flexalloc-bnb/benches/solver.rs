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

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use flexalloc_bnb::bnb::BnbSolver;
use flexalloc_bnb::bound::AggregateRelaxation;
use flexalloc_bnb::feasibility::WeightedSumSpeeds;
use flexalloc_bnb::monitor::no_op::NoOperationMonitor;
use flexalloc_model::index::{JobIndex, ServerIndex};
use flexalloc_model::model::{Model, ModelBuilder};
use std::hint::black_box;

type IntegerType = i64;

/// Deterministic synthetic instance. Requirements, values, and deadlines
/// cycle through small coprime patterns so the search tree is non-trivial
/// without being exponential at bench sizes.
fn build_instance(num_jobs: usize, num_servers: usize) -> Model<IntegerType> {
    let mut builder = ModelBuilder::<IntegerType>::new(num_jobs, num_servers);

    for job in 0..num_jobs {
        let job_index = JobIndex::new(job);
        let storage = 1 + (job as IntegerType % 3);
        let computation = 1 + (job as IntegerType % 2);
        let results_data = 1 + (job as IntegerType % 2);
        builder
            .set_job_requirements(job_index, storage, computation, results_data)
            .set_job_value(job_index, 5 + (job as IntegerType * 7) % 13)
            .set_job_deadline(job_index, 3 + (job as IntegerType % 3));
    }

    for server in 0..num_servers {
        let server_index = ServerIndex::new(server);
        let size = 3 + (server as IntegerType % 3);
        builder.set_server_capacities(server_index, size, size, size);
    }

    builder.build()
}

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_solve");

    for (num_jobs, num_servers) in [(6, 2), (8, 3), (10, 4)] {
        let model = build_instance(num_jobs, num_servers);
        let policy = WeightedSumSpeeds::<IntegerType>::default();
        let oracle = AggregateRelaxation::new();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", num_jobs, num_servers)),
            &model,
            |b, model| {
                let mut solver = BnbSolver::new();
                b.iter(|| {
                    let outcome =
                        solver.solve(black_box(model), &policy, &oracle, NoOperationMonitor::new());
                    black_box(outcome)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_solver);
criterion_main!(benches);
