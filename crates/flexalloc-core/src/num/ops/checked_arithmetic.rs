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

//! Checked arithmetic by value.
//!
//! The deadline predicate of the allocation model multiplies up to four
//! integers before comparing. Every one of those products goes through the
//! traits below, so an overflow is always observed as `None` rather than a
//! wrapped value silently flipping a feasibility decision.

use core::ops::{Add, Div, Mul, Rem, Sub};

/// Checked addition by value, returning `None` if overflow occurs.
///
/// # Examples
///
/// ```rust
/// # use flexalloc_core::num::ops::checked_arithmetic::CheckedAddVal;
/// let a: i64 = i64::MAX - 1;
/// assert_eq!(a.checked_add_val(1), Some(i64::MAX));
/// assert_eq!(a.checked_add_val(2), None);
/// ```
pub trait CheckedAddVal: Sized + Add<Self, Output = Self> {
    /// Performs checked addition by value.
    fn checked_add_val(self, v: Self) -> Option<Self>;
}

/// Checked subtraction by value, returning `None` if underflow occurs.
///
/// # Examples
///
/// ```rust
/// # use flexalloc_core::num::ops::checked_arithmetic::CheckedSubVal;
/// let a: i64 = i64::MIN + 1;
/// assert_eq!(a.checked_sub_val(1), Some(i64::MIN));
/// assert_eq!(a.checked_sub_val(2), None);
/// ```
pub trait CheckedSubVal: Sized + Sub<Self, Output = Self> {
    /// Performs checked subtraction by value.
    fn checked_sub_val(self, v: Self) -> Option<Self>;
}

/// Checked multiplication by value, returning `None` if overflow occurs.
///
/// # Examples
///
/// ```rust
/// # use flexalloc_core::num::ops::checked_arithmetic::CheckedMulVal;
/// let a: i32 = 1 << 20;
/// assert_eq!(a.checked_mul_val(2), Some(1 << 21));
/// assert_eq!(a.checked_mul_val(a), None);
/// ```
pub trait CheckedMulVal: Sized + Mul<Self, Output = Self> {
    /// Performs checked multiplication by value.
    fn checked_mul_val(self, v: Self) -> Option<Self>;
}

/// Checked division by value, returning `None` on division by zero.
///
/// # Examples
///
/// ```rust
/// # use flexalloc_core::num::ops::checked_arithmetic::CheckedDivVal;
/// let a: i64 = 100;
/// assert_eq!(a.checked_div_val(4), Some(25));
/// assert_eq!(a.checked_div_val(0), None);
/// ```
pub trait CheckedDivVal: Sized + Div<Self, Output = Self> {
    /// Performs checked division by value.
    fn checked_div_val(self, v: Self) -> Option<Self>;
}

/// Checked remainder by value, returning `None` on division by zero.
///
/// # Examples
///
/// ```rust
/// # use flexalloc_core::num::ops::checked_arithmetic::CheckedRemVal;
/// let a: i64 = 10;
/// assert_eq!(a.checked_rem_val(3), Some(1));
/// assert_eq!(a.checked_rem_val(0), None);
/// ```
pub trait CheckedRemVal: Sized + Rem<Self, Output = Self> {
    /// Performs checked remainder by value.
    fn checked_rem_val(self, v: Self) -> Option<Self>;
}

macro_rules! impl_checked_val {
    ($($t:ty),*) => {
        $(
            impl CheckedAddVal for $t {
                #[inline(always)]
                fn checked_add_val(self, v: Self) -> Option<Self> {
                    <$t>::checked_add(self, v)
                }
            }
            impl CheckedSubVal for $t {
                #[inline(always)]
                fn checked_sub_val(self, v: Self) -> Option<Self> {
                    <$t>::checked_sub(self, v)
                }
            }
            impl CheckedMulVal for $t {
                #[inline(always)]
                fn checked_mul_val(self, v: Self) -> Option<Self> {
                    <$t>::checked_mul(self, v)
                }
            }
            impl CheckedDivVal for $t {
                #[inline(always)]
                fn checked_div_val(self, v: Self) -> Option<Self> {
                    <$t>::checked_div(self, v)
                }
            }
            impl CheckedRemVal for $t {
                #[inline(always)]
                fn checked_rem_val(self, v: Self) -> Option<Self> {
                    <$t>::checked_rem(self, v)
                }
            }
        )*
    };
}

impl_checked_val!(i8, i16, i32, i64, i128, isize);
impl_checked_val!(u8, u16, u32, u64, u128, usize);
