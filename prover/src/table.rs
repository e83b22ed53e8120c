// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use air::{encoding::encode_witness, BaseElement, Digest256, HashFn, Witness};
use crypto::{Hasher, RandomElementGenerator};
use math::FieldElement;
use rand::RngCore;
#[cfg(feature = "concurrent")]
use utils::iterators::*;
use utils::{iter_mut, Randomizable};

// CONSTANTS
// ================================================================================================

/// Domain separator for the seed of the evaluation table.
const TABLE_SEED_DOMAIN: &[u8] = b"tundra/evaluation-table/v1";

/// Minimum number of table entries processed by a single thread.
#[cfg(feature = "concurrent")]
const MIN_CONCURRENT_ENTRIES: usize = 1024;

// EVALUATION TABLE
// ================================================================================================

/// Returns the evaluation table for the provided witness.
///
/// The table is derived deterministically from the canonical encoding of the witness and the
/// statement hash: entry `i` is the field element at position `i` of a [RandomElementGenerator]
/// seeded with hash(domain || witness || statement_hash).
pub fn build_evaluation_table(
    statement_hash: &BaseElement,
    witness: &Witness,
    trace_length: usize,
) -> Vec<BaseElement> {
    let generator = RandomElementGenerator::<HashFn>::new(table_seed(statement_hash, witness));

    let mut table = vec![BaseElement::ZERO; trace_length];
    iter_mut!(table, MIN_CONCURRENT_ENTRIES)
        .enumerate()
        .for_each(|(i, value)| *value = generator.element_at(i as u64));
    table
}

fn table_seed(statement_hash: &BaseElement, witness: &Witness) -> Digest256 {
    let mut data = TABLE_SEED_DOMAIN.to_vec();
    data.extend_from_slice(&encode_witness(witness));
    data.extend_from_slice(&statement_hash.to_be_bytes());
    HashFn::hash(&data)
}

// WITNESS BLINDING
// ================================================================================================

/// Returns `n` field elements drawn uniformly at random from the provided source.
pub fn draw_blinding_factors<R: RngCore>(rng: &mut R, n: usize) -> Vec<BaseElement> {
    (0..n).map(|_| draw_element(rng)).collect()
}

/// Adds blinding factors to the table values element-wise.
pub fn apply_blinding(values: &mut [BaseElement], blinding_factors: &[BaseElement]) {
    debug_assert_eq!(values.len(), blinding_factors.len());
    iter_mut!(values, MIN_CONCURRENT_ENTRIES)
        .zip(blinding_factors)
        .for_each(|(value, factor)| *value += *factor);
}

/// Draws 66 random bytes keeping the low 521 bits until they form a valid field element. The
/// only rejected value is the modulus itself.
fn draw_element<R: RngCore>(rng: &mut R) -> BaseElement {
    let mut bytes = [0u8; BaseElement::VALUE_SIZE];
    loop {
        rng.fill_bytes(&mut bytes);
        if let Some(value) = BaseElement::from_random_bytes(&bytes) {
            return value;
        }
    }
}
