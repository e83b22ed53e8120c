// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Components needed for parallel iterators.
//!
//! When `concurrent` feature is enabled, this module re-exports `rayon::prelude`. Otherwise,
//! this is an empty module.
//!
//! The macros below check the `concurrent` feature of the crate in which they are expanded, so
//! every crate using them declares its own `concurrent` feature and imports this module when
//! the feature is on.

#[cfg(feature = "concurrent")]
pub use rayon::{current_num_threads as rayon_num_threads, prelude::*};

/// Returns either a regular or a parallel iterator over a collection depending on whether
/// `concurrent` feature is enabled.
///
/// Optionally, `min_length` can be used to specify the minimum number of items processed by
/// each thread; it is ignored when `concurrent` feature is disabled.
#[macro_export]
macro_rules! iter {
    ($e:expr) => {{
        #[cfg(feature = "concurrent")]
        let result = $e.par_iter();

        #[cfg(not(feature = "concurrent"))]
        let result = $e.iter();

        result
    }};
    ($e:expr, $min_len:expr) => {{
        #[cfg(feature = "concurrent")]
        let result = $e.par_iter().with_min_len($min_len);

        #[cfg(not(feature = "concurrent"))]
        let result = $e.iter();

        result
    }};
}

/// Returns either a regular or a parallel mutable iterator over a collection depending on
/// whether `concurrent` feature is enabled.
///
/// Optionally, `min_length` can be used to specify the minimum number of items processed by
/// each thread; it is ignored when `concurrent` feature is disabled.
#[macro_export]
macro_rules! iter_mut {
    ($e:expr) => {{
        #[cfg(feature = "concurrent")]
        let result = $e.par_iter_mut();

        #[cfg(not(feature = "concurrent"))]
        let result = $e.iter_mut();

        result
    }};
    ($e:expr, $min_len:expr) => {{
        #[cfg(feature = "concurrent")]
        let result = $e.par_iter_mut().with_min_len($min_len);

        #[cfg(not(feature = "concurrent"))]
        let result = $e.iter_mut();

        result
    }};
}
