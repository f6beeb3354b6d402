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

//! # Flexalloc Model
//!
//! Problem data for the flexible resource allocation problem: jobs with
//! storage, computation and results-data requirements, a value and a
//! deadline; servers with storage, computation and bandwidth capacities.
//! Assigning a job to a server picks a loading/compute/sending speed triple
//! that must meet the job's deadline in exact integer arithmetic.
//!
//! ## Modules
//!
//! - `index`: Strongly typed `JobIndex` and `ServerIndex`.
//! - `capacity`: `Capacity<T>` and `SpeedTriple<T>` value objects plus the
//!   `ResourceDimension` discriminant.
//! - `model`: The immutable `Model<T>` (SoA layout), its fail-fast
//!   `ModelBuilder<T>`, and the log-space `Complexity` of the search tree.
//! - `ledger`: The `AllocationLedger<T>` tracking assignments and residual
//!   capacities, with the exact deadline predicate and the allocation error
//!   taxonomy.
//! - `solution`: The frozen `Solution<T>` record of a complete allocation.

pub mod capacity;
pub mod index;
pub mod ledger;
pub mod model;
pub mod solution;
