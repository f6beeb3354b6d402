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

//! Flexalloc-BnB: exact branch and bound for deadline-constrained job
//! allocation
//!
//! High-level crate that implements a deterministic, modular best-first
//! branch and bound solver. The solver separates speed selection, bounding,
//! monitoring, and incumbent handling so you can swap strategies without
//! touching the core search logic.
//!
//! Core flow
//! - Provide a `flexalloc_model::Model<T>`.
//! - Choose a `feasibility::SpeedPolicy` (which speed triple a job runs at).
//! - Choose a `bound::RelaxationOracle` (admissible upper bounds).
//! - Optionally set a fixed-speed table, a shared incumbent, and monitors.
//! - Run `bnb::BnbSolver` directly, or integrate via `portfolio`.
//!
//! Design highlights
//! - Separation of concerns: policies materialise speeds; oracles inject
//!   bounds; monitors observe/control; outcomes carry stats.
//! - Best-first frontier: nodes are expanded in descending bound order, so
//!   the first exhaustion of the frontier proves optimality.
//! - Deterministic given deterministic policies and oracles.
//!
//! Assumptions and guarantees
//! - Upper bounds must be admissible (no underestimation of the subtree
//!   optimum); pruning logic relies on this for correctness.
//!
//! Module map
//! - `bnb`: the solver engine and session orchestration.
//! - `feasibility`: the deadline oracle and speed policies.
//! - `bound`: relaxation oracles.
//! - `queue`: the comparator-driven frontier.
//! - `node`: frontier nodes and their ordering.
//! - `monitor`: tree search monitors (log, composite, wrappers).
//! - `portfolio`: adapter to the `flexalloc_search` portfolio API.
//! - `result`: solver outcomes with termination reasons.
//! - `stats`: lightweight counters/timing.
//! - `fixed`: pre-committed speed tables for comparison runs.

pub mod bnb;
pub mod bound;
pub mod feasibility;
pub mod fixed;
mod incumbent;
pub mod monitor;
pub mod node;
pub mod portfolio;
pub mod queue;
pub mod result;
pub mod stats;
