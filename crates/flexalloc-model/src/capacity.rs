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

//! # Capacities and Speed Triples
//!
//! Value objects shared by the model, the ledger and the solver: a server's
//! (or residual) capacity across the three resource dimensions, and the
//! loading/compute/sending speed triple chosen for an assigned job.
//!
//! Allocation consumes rate, not a job's total requirement: the loading
//! speed draws on storage capacity, the compute speed on computation
//! capacity, and the sending speed on bandwidth capacity. The component-wise
//! operations here are deliberately dumb (`fits`, `consume`, `restore`,
//! `saturating_add`); all deadline reasoning lives in the ledger.

use flexalloc_core::num::ops::saturating_arithmetic::SaturatingAddVal;
use num_traits::{PrimInt, Signed};

/// The three resource dimensions of a server.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ResourceDimension {
    /// Storage capacity, consumed by loading speeds.
    Storage,
    /// Computation capacity, consumed by compute speeds.
    Computation,
    /// Bandwidth capacity, consumed by sending speeds.
    Bandwidth,
}

impl std::fmt::Display for ResourceDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceDimension::Storage => write!(f, "storage"),
            ResourceDimension::Computation => write!(f, "computation"),
            ResourceDimension::Bandwidth => write!(f, "bandwidth"),
        }
    }
}

/// A capacity (or residual capacity) across the three resource dimensions.
///
/// # Examples
///
/// ```rust
/// # use flexalloc_model::capacity::{Capacity, SpeedTriple};
/// let cap = Capacity::new(10i64, 8, 6);
/// assert!(cap.fits(&SpeedTriple::new(10, 8, 6)));
/// assert!(!cap.fits(&SpeedTriple::new(11, 1, 1)));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Capacity<T> {
    /// Available storage.
    pub storage: T,
    /// Available computation.
    pub computation: T,
    /// Available bandwidth.
    pub bandwidth: T,
}

impl<T> Capacity<T>
where
    T: PrimInt + Signed,
{
    /// Creates a new capacity from its three components.
    #[inline]
    pub const fn new(storage: T, computation: T, bandwidth: T) -> Self {
        Self {
            storage,
            computation,
            bandwidth,
        }
    }

    /// Returns the component for the given resource dimension.
    #[inline]
    pub fn dimension(&self, dimension: ResourceDimension) -> T {
        match dimension {
            ResourceDimension::Storage => self.storage,
            ResourceDimension::Computation => self.computation,
            ResourceDimension::Bandwidth => self.bandwidth,
        }
    }

    /// Checks whether a speed triple fits into this capacity component-wise.
    #[inline]
    pub fn fits(&self, speeds: &SpeedTriple<T>) -> bool {
        speeds.loading <= self.storage
            && speeds.compute <= self.computation
            && speeds.sending <= self.bandwidth
    }

    /// Returns the first dimension a speed triple exceeds, if any.
    pub fn exceeded_dimension(&self, speeds: &SpeedTriple<T>) -> Option<ResourceDimension> {
        if speeds.loading > self.storage {
            Some(ResourceDimension::Storage)
        } else if speeds.compute > self.computation {
            Some(ResourceDimension::Computation)
        } else if speeds.sending > self.bandwidth {
            Some(ResourceDimension::Bandwidth)
        } else {
            None
        }
    }

    /// Subtracts a speed triple from this capacity.
    ///
    /// The caller must have checked `fits` first.
    #[inline]
    pub fn consume(&mut self, speeds: &SpeedTriple<T>) {
        debug_assert!(
            self.fits(speeds),
            "called `Capacity::consume` with a speed triple that does not fit"
        );

        self.storage = self.storage - speeds.loading;
        self.computation = self.computation - speeds.compute;
        self.bandwidth = self.bandwidth - speeds.sending;
    }

    /// Returns a speed triple to this capacity, undoing a prior `consume`.
    #[inline]
    pub fn restore(&mut self, speeds: &SpeedTriple<T>) {
        self.storage = self.storage + speeds.loading;
        self.computation = self.computation + speeds.compute;
        self.bandwidth = self.bandwidth + speeds.sending;
    }

    /// Component-wise saturating sum of two capacities.
    ///
    /// Used to fold all servers into one aggregate capacity; clamping only
    /// loosens any bound derived from the aggregate.
    #[inline]
    pub fn saturating_add(&self, other: &Self) -> Self
    where
        T: SaturatingAddVal,
    {
        Self {
            storage: self.storage.saturating_add_val(other.storage),
            computation: self.computation.saturating_add_val(other.computation),
            bandwidth: self.bandwidth.saturating_add_val(other.bandwidth),
        }
    }

    /// The fastest speed triple this capacity could support.
    ///
    /// The deadline predicate is monotone in every speed, so checking this
    /// triple answers "can any valid triple fit" in constant time.
    #[inline]
    pub fn maximal_speeds(&self) -> SpeedTriple<T> {
        SpeedTriple {
            loading: self.storage,
            compute: self.computation,
            sending: self.bandwidth,
        }
    }
}

/// The loading/compute/sending speed triple chosen for an assigned job.
///
/// A triple is only meaningful when all three components are strictly
/// positive; `is_valid` checks exactly that.
///
/// # Examples
///
/// ```rust
/// # use flexalloc_model::capacity::SpeedTriple;
/// assert!(SpeedTriple::new(1i64, 1, 1).is_valid());
/// assert!(!SpeedTriple::new(0i64, 1, 1).is_valid());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SpeedTriple<T> {
    /// The loading speed.
    pub loading: T,
    /// The compute speed.
    pub compute: T,
    /// The sending speed.
    pub sending: T,
}

impl<T> SpeedTriple<T>
where
    T: PrimInt + Signed,
{
    /// Creates a new speed triple.
    #[inline]
    pub const fn new(loading: T, compute: T, sending: T) -> Self {
        Self {
            loading,
            compute,
            sending,
        }
    }

    /// Checks that all three speeds are strictly positive.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.loading > T::zero() && self.compute > T::zero() && self.sending > T::zero()
    }
}

impl<T> std::fmt::Display for SpeedTriple<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.loading, self.compute, self.sending)
    }
}
