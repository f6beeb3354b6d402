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

//! Saturating arithmetic by value.
//!
//! Aggregate capacities and statistics counters clamp at the type bounds
//! instead of overflowing; a saturated aggregate only ever loosens a
//! relaxation bound, never a feasibility decision.

use core::ops::{Add, Mul, Sub};

/// Saturating addition by value, clamping at the numeric bounds.
///
/// # Examples
///
/// ```rust
/// # use flexalloc_core::num::ops::saturating_arithmetic::SaturatingAddVal;
/// let a: i8 = 120;
/// assert_eq!(a.saturating_add_val(10), 127);
/// assert_eq!((-120i8).saturating_add_val(-20), -128);
/// ```
pub trait SaturatingAddVal: Sized + Add<Self, Output = Self> {
    /// Performs saturating addition by value.
    fn saturating_add_val(self, v: Self) -> Self;
}

/// Saturating subtraction by value, clamping at the numeric bounds.
///
/// # Examples
///
/// ```rust
/// # use flexalloc_core::num::ops::saturating_arithmetic::SaturatingSubVal;
/// let a: u8 = 5;
/// assert_eq!(a.saturating_sub_val(10), 0);
/// assert_eq!((-120i8).saturating_sub_val(20), -128);
/// ```
pub trait SaturatingSubVal: Sized + Sub<Self, Output = Self> {
    /// Performs saturating subtraction by value.
    fn saturating_sub_val(self, v: Self) -> Self;
}

/// Saturating multiplication by value, clamping at the numeric bounds.
///
/// # Examples
///
/// ```rust
/// # use flexalloc_core::num::ops::saturating_arithmetic::SaturatingMulVal;
/// let a: i16 = 1000;
/// assert_eq!(a.saturating_mul_val(1000), i16::MAX);
/// assert_eq!(12i16.saturating_mul_val(12), 144);
/// ```
pub trait SaturatingMulVal: Sized + Mul<Self, Output = Self> {
    /// Performs saturating multiplication by value.
    fn saturating_mul_val(self, v: Self) -> Self;
}

macro_rules! impl_saturating_val {
    ($($t:ty),*) => {
        $(
            impl SaturatingAddVal for $t {
                #[inline(always)]
                fn saturating_add_val(self, v: Self) -> Self {
                    <$t>::saturating_add(self, v)
                }
            }
            impl SaturatingSubVal for $t {
                #[inline(always)]
                fn saturating_sub_val(self, v: Self) -> Self {
                    <$t>::saturating_sub(self, v)
                }
            }
            impl SaturatingMulVal for $t {
                #[inline(always)]
                fn saturating_mul_val(self, v: Self) -> Self {
                    <$t>::saturating_mul(self, v)
                }
            }
        )*
    };
}

impl_saturating_val!(i8, i16, i32, i64, i128, isize);
impl_saturating_val!(u8, u16, u32, u64, u128, usize);
