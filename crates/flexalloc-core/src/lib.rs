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

//! # Flexalloc Core
//!
//! Foundational building blocks shared by the flexalloc model and solver
//! crates. The allocation engine works exclusively in exact integer
//! arithmetic, so this crate concentrates the numeric plumbing that makes
//! generic integer code predictable, plus the strongly typed indices that
//! keep job and server index spaces from being mixed up.
//!
//! ## Modules
//!
//! - `num`: Associated-constant traits (`Zero`, `PlusOne`, `MinusOne`) and
//!   by-value checked/saturating arithmetic traits mirroring the intrinsic
//!   methods on primitive integers.
//! - `utils`: The phantom-tagged `TypedIndex<T>` wrapper used for all entity
//!   indices in the workspace.
//!
//! Refer to each module for detailed APIs and examples.

pub mod num;
pub mod utils;
