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

//! # Flexalloc Search
//!
//! Shared infrastructure for exact search over allocation models: the
//! concurrent incumbent holder, search monitors, result and statistics
//! types, and the portfolio solver interface. Concrete search algorithms
//! (e.g. branch-and-bound) live in their own crates and plug into the
//! pieces defined here.
//!
//! ## Modules
//!
//! - `num`: The `SolverNumeric` trait alias bundling the integer bounds
//!   required by search components.
//! - `incumbent`: `SharedIncumbent<T>`, the thread-safe best-solution holder.
//! - `monitor`: The `SearchMonitor<T>` trait and stock monitors (time limit,
//!   interrupt, solution count, composite).
//! - `result`: `SolverResult<T>`, `TerminationReason` and `SolverOutcome<T>`.
//! - `stats`: Aggregated `SolverStatistics` with a builder.
//! - `portfolio`: The `PortfolioSolver<T>` trait and its context and result
//!   types, for running several search strategies against one incumbent.

pub mod incumbent;
pub mod monitor;
pub mod num;
pub mod portfolio;
pub mod result;
pub mod stats;
