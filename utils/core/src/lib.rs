// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains utility traits, functions, and macros used by other crates of the Tundra
//! STARK prover and verifier.
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod iterators;


// FEATURE-BASED RE-EXPORTS
// ================================================================================================

#[cfg(feature = "concurrent")]
pub use rayon;

// RANDOMNESS
// ================================================================================================

/// Defines how `Self` can be read from a sequence of random bytes.
pub trait Randomizable: Sized {
    /// Size of `Self` in bytes.
    ///
    /// This is used to determine how many bytes should be passed to the
    /// [from_random_bytes()](Self::from_random_bytes) function.
    const VALUE_SIZE: usize;

    /// Returns `Self` if the set of bytes forms a valid value, otherwise returns None.
    fn from_random_bytes(source: &[u8]) -> Option<Self>;
}

impl Randomizable for u64 {
    const VALUE_SIZE: usize = 8;

    fn from_random_bytes(source: &[u8]) -> Option<Self> {
        let bytes = source.get(..Self::VALUE_SIZE)?.try_into().ok()?;
        Some(u64::from_le_bytes(bytes))
    }
}

impl Randomizable for u32 {
    const VALUE_SIZE: usize = 4;

    fn from_random_bytes(source: &[u8]) -> Option<Self> {
        let bytes = source.get(..Self::VALUE_SIZE)?.try_into().ok()?;
        Some(u32::from_le_bytes(bytes))
    }
}

impl Randomizable for u8 {
    const VALUE_SIZE: usize = 1;

    fn from_random_bytes(source: &[u8]) -> Option<Self> {
        source.first().copied()
    }
}

impl<const N: usize> Randomizable for [u8; N] {
    const VALUE_SIZE: usize = N;

    fn from_random_bytes(source: &[u8]) -> Option<Self> {
        source.get(..N)?.try_into().ok()
    }
}

// CONSTANT-TIME COMPARISON
// ================================================================================================

/// Returns true if `a` and `b` hold the same bytes.
///
/// The running time depends only on the lengths of the inputs and never on their contents, so
/// the comparison does not stop at the first differing byte.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let diff = a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y));
    core::hint::black_box(diff) == 0
}

/// Returns `a` when `choice` is 0 and `b` when `choice` is 1, without branching on `choice`.
///
/// # Panics
/// Panics in debug builds if `choice` is neither 0 nor 1.
#[inline(always)]
pub fn ct_select_u64(a: u64, b: u64, choice: u64) -> u64 {
    debug_assert!(choice <= 1, "choice must be 0 or 1");
    let mask = 0u64.wrapping_sub(choice);
    (a & !mask) | (b & mask)
}
