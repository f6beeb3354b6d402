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

//! # Shared Incumbent (Best Solution Holder)
//!
//! A concurrent container for the best solution discovered so far during
//! search. It exposes a fast, lock-free best value via an atomic and stores
//! the actual `Solution<T>` behind a `Mutex` as the source of truth. Designed
//! for exact search pipelines where multiple threads propose improvements.
//!
//! ## Motivation
//!
//! - Fast heuristic checks: a cheap atomic best value short-circuits attempts
//!   to install obviously worse candidates without locking.
//! - Correctness by locking: the authoritative incumbent is protected by a
//!   `Mutex`, ensuring consistent updates even under contention.
//! - Simple sentinel: `best_value` starts at `i64::MIN` meaning "no incumbent
//!   yet."
//!
//! ## Highlights
//!
//! - `try_install(&Solution<T>) -> bool` installs strictly better candidates,
//!   updating both the snapshot and the atomic best value.
//! - `snapshot() -> Option<Solution<T>>` returns a cloned snapshot of the
//!   current incumbent (if any).
//! - `best_value() -> i64` and `best_value_as::<T>() -> Result<T, _>` for
//!   quick reads and typed conversions.
//! - Concurrency: atomic reads/writes use `Ordering::Relaxed` for
//!   performance, while the mutex ensures correctness of the stored solution.
//!
//! ## Usage
//!
//! ```rust
//! use flexalloc_search::incumbent::SharedIncumbent;
//! use flexalloc_model::solution::Solution;
//!
//! let inc: SharedIncumbent<i64> = SharedIncumbent::new();
//! let candidate = Solution::new(
//!     100,
//!     Vec::new(),
//!     Vec::new(),
//!     Vec::new(),
//!     Vec::new(),
//!     Vec::new(),
//! );
//!
//! if inc.try_install(&candidate) {
//!     // Installed as new best
//! }
//!
//! let best = inc.best_value();   // fast atomic read
//! let snap = inc.snapshot();     // optional cloned solution
//! ```

use flexalloc_model::solution::Solution;
use num_traits::{PrimInt, Signed};
use std::sync::{Mutex, atomic::AtomicI64};

/// A concurrent holder for the best (incumbent) solution found during search.
///
/// This structure maintains:
/// - an `AtomicI64` best value (total allocation value) for fast, lock-free
///   reads, and
/// - a `Mutex<Option<Solution<T>>>` for the actual solution, which is the
///   source of truth.
///
/// Concurrency and memory ordering:
/// - The best value is loaded/stored with `Ordering::Relaxed`. This is
///   sufficient because it serves as a heuristic to short-circuit work (e.g.,
///   avoid locking when a candidate is obviously worse). All
///   correctness-sensitive state (the solution and its value) is synchronized
///   via the `Mutex`.
///
/// Sentinel initialization:
/// - `best_value` is initialized to `i64::MIN` to represent "no solution
///   installed yet." Using an `Option<AtomicI64>` would introduce additional
///   branching with negligible benefit in this use case. Since we maximize
///   the total value and cannot represent values below `i64::MIN`, the
///   sentinel is both simple and effective.
#[derive(Debug)]
pub struct SharedIncumbent<T> {
    /// Total value of the incumbent solution stored as `i64` for atomic access.
    ///
    /// When Rust gains support for generic atomics (e.g., `Atomic<T>`),
    /// consider migrating to a type that matches the value's representation.
    ///
    /// See the tracking issue:
    /// - Generic atomics: [rust-lang/rust#130539](https://github.com/rust-lang/rust/issues/130539)
    best_value: AtomicI64,

    /// The incumbent solution, protected by a mutex for safe concurrent access.
    solution: Mutex<Option<Solution<T>>>,
}

impl<T> Default for SharedIncumbent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Display for SharedIncumbent<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let best_value = self.best_value();
        write!(f, "Incumbent(best_value: {})", best_value)
    }
}

impl<T> SharedIncumbent<T> {
    /// Creates a new shared incumbent with no solution installed.
    /// The initial best value is set to `i64::MIN`.
    #[inline]
    pub fn new() -> Self {
        SharedIncumbent {
            best_value: AtomicI64::new(i64::MIN),
            solution: Mutex::new(None),
        }
    }

    /// Returns the current best value.
    #[inline]
    pub fn best_value(&self) -> i64 {
        self.best_value.load(std::sync::atomic::Ordering::Relaxed)
    }

    /// Returns the current best value converted to type T.
    #[inline]
    pub fn best_value_as(&self) -> Result<T, <T as std::convert::TryFrom<i64>>::Error>
    where
        T: TryFrom<i64>,
    {
        let val = self.best_value.load(std::sync::atomic::Ordering::Relaxed);
        T::try_from(val)
    }

    /// Returns a snapshot of the current incumbent solution, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<Solution<T>>
    where
        T: Clone,
    {
        let guard = self.solution.lock().unwrap();
        guard.clone()
    }

    /// Attempts to install the given candidate solution as the new incumbent.
    /// Returns `true` if the candidate was installed, `false` otherwise.
    #[inline]
    pub fn try_install(&self, candidate: &Solution<T>) -> bool
    where
        T: PrimInt + Signed + Into<i64>,
    {
        let candidate_value: i64 = candidate.total_value().into();
        let current_best = self.best_value();

        // We are maximizing, so higher is better.
        if candidate_value <= current_best {
            return false;
        }

        let mut guard = self.solution.lock().unwrap();
        // Another thread might have updated the solution while we were waiting for the lock.
        // We must compare against the *actual* solution in the Mutex, not the atomic hint we read earlier.
        if let Some(current_solution) = guard.as_ref() {
            let current_value: i64 = current_solution.total_value().into();
            if candidate_value <= current_value {
                return false;
            }
        }

        // Install the new incumbent.
        *guard = Some(candidate.clone());
        // Update the best value atomically.
        self.best_value
            .store(candidate_value, std::sync::atomic::Ordering::Relaxed);

        true
    }
}
