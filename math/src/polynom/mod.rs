// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Basic polynomial operations.
//!
//! Polynomials are represented by their coefficients in ascending order of degree, so `p[0]` is
//! the constant term.

use crate::field::FieldElement;


// POLYNOMIAL EVALUATION
// ================================================================================================

/// Evaluates polynomial `p` at coordinate `x`.
///
/// The empty polynomial evaluates to ZERO everywhere.
pub fn eval<E: FieldElement>(p: &[E], x: E) -> E {
    // Horner evaluation
    p.iter().rev().fold(E::ZERO, |acc, &coeff| acc * x + coeff)
}
