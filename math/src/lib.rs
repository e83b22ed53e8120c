// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains modules with mathematical operations needed by the Tundra STARK prover
//! and verifier.
//!
//! # Finite field arithmetic
//! [FieldElement] and [StarkField] traits define the contract of a prime field. The only
//! concrete field is [fields::p521], the prime field with modulus $2^{521} - 1$. Its elements
//! support addition, subtraction, multiplication, negation, exponentiation and inversion. All
//! of these run in constant time.
//!
//! Elements can be converted to and from 66-byte big-endian encodings, and to and from decimal
//! strings. With the `serde` feature enabled, elements serialize as decimal strings.
//!
//! # Polynomials
//! [polynom::eval] evaluates a polynomial given by its coefficients using Horner's method.
#![no_std]

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod polynom;

mod field;
pub use field::{FieldElement, StarkField};
pub mod fields {
    //! Finite field implementations.

    pub use super::field::p521;
}

mod errors;
pub use errors::ElementDecodingError;
