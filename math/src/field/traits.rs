// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::{
    fmt::{Debug, Display},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use utils::Randomizable;

// FIELD ELEMENT
// ================================================================================================

/// Defines an element of a prime field.
///
/// Implementations keep elements in canonical form, so equality of two elements is equality of
/// their integer values.
pub trait FieldElement:
    Copy
    + Clone
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + Eq
    + PartialEq
    + Sized
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + AddAssign<Self>
    + SubAssign<Self>
    + MulAssign<Self>
    + Neg<Output = Self>
    + From<u64>
    + From<u32>
    + From<u8>
    + Randomizable
{
    /// Canonical byte encoding of an element.
    type Bytes: AsRef<[u8]> + Copy;

    /// Number of bytes needed to encode an element
    const ELEMENT_BYTES: usize;

    /// The additive identity.
    const ZERO: Self;

    /// The multiplicative identity.
    const ONE: Self;

    // ALGEBRA
    // --------------------------------------------------------------------------------------------

    /// Returns this field element added to itself.
    fn double(self) -> Self {
        self + self
    }

    /// Returns this field element raised to power 2.
    fn square(self) -> Self {
        self * self
    }

    /// Exponentiates this field element by `power`.
    fn exp(self, power: u64) -> Self {
        self.exp_limbs(&[power])
    }

    /// Exponentiates this field element by an integer given as little-endian 64-bit limbs.
    ///
    /// The running time depends only on the number of limbs in `power`.
    fn exp_limbs(self, power: &[u64]) -> Self;

    // SERIALIZATION
    // --------------------------------------------------------------------------------------------

    /// Returns the canonical big-endian encoding of this element.
    fn to_be_bytes(&self) -> Self::Bytes;

    /// Interprets `bytes` as a big-endian integer of any length and reduces it by the field
    /// modulus.
    fn from_be_bytes_reduce(bytes: &[u8]) -> Self;
}

// STARK FIELD
// ================================================================================================

pub trait StarkField: FieldElement {
    /// Prime modulus of the field written in decimal.
    const MODULUS_DECIMAL: &'static str;

    /// The number of bits needed to represents the field modulus.
    const MODULUS_BITS: u32;

    /// Returns true if `self` and `other` are the same element. Unlike `==`, the comparison
    /// takes the same time for all pairs of elements.
    fn ct_eq(&self, other: &Self) -> bool;
}
