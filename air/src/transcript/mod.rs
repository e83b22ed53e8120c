// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Fiat-Shamir transcript shared by the prover and the verifier.
//!
//! Every value derived here is a pure function of public data: the statement hash, the Merkle
//! root, and the query values. The prover and the verifier therefore obtain the same challenge
//! and the same query positions without interaction.

use alloc::{format, vec::Vec};

use crypto::{Digest, Hasher, PublicCoin, RandomCoinError};
use math::{fields::p521::BaseElement, polynom, FieldElement};

use crate::{Digest256, HashFn};


// CHALLENGE
// ================================================================================================

/// Returns the challenge for a commitment.
///
/// The challenge is the hash of the decimal form of `statement_hash` followed by the lowercase
/// hex form of `merkle_root`, read as a big-endian integer and reduced by the field modulus.
pub fn derive_challenge(statement_hash: &BaseElement, merkle_root: &Digest256) -> BaseElement {
    let transcript = format!("{statement_hash}{merkle_root}");
    BaseElement::from_be_bytes_reduce(&HashFn::hash(transcript.as_bytes()).as_bytes())
}

// QUERY POSITIONS
// ================================================================================================

/// Returns `num_queries` unique positions in the range [0, `trace_length`) derived from the
/// challenge.
///
/// A public coin is seeded with the hash of the 66-byte big-endian encoding of the challenge.
/// Positions are returned in the order in which they were drawn; this is also the order of
/// query responses in a proof.
///
/// # Errors
/// Returns an error if `trace_length` is not a power of two, if `num_queries` exceeds
/// `trace_length`, or if not enough unique positions were drawn after 1000 attempts.
pub fn draw_query_positions(
    challenge: &BaseElement,
    num_queries: usize,
    trace_length: usize,
) -> Result<Vec<usize>, RandomCoinError> {
    let mut coin = PublicCoin::<HashFn>::new(&challenge.to_be_bytes());
    coin.draw_integers(num_queries, trace_length)
}

// RESPONSE
// ================================================================================================

/// Returns the response for the provided terms.
///
/// The response is the polynomial with coefficients `[statement_hash, t_0, ..., t_{m-1}]`
/// evaluated at `challenge`, i.e. `statement_hash + sum(challenge^(j+1) * t_j)`. The terms are
/// the queried values, followed by the opened blinding factors in double commitment mode.
pub fn compute_response(
    statement_hash: BaseElement,
    challenge: BaseElement,
    values: &[BaseElement],
) -> BaseElement {
    let mut coefficients = Vec::with_capacity(values.len() + 1);
    coefficients.push(statement_hash);
    coefficients.extend_from_slice(values);
    polynom::eval(&coefficients, challenge)
}
