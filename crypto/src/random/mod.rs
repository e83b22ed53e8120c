// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use math::FieldElement;

use crate::{errors::RandomCoinError, Digest, Hasher};


// CONSTANTS
// ================================================================================================

/// Number of PRNG calls after which [PublicCoin::draw_integers()] gives up.
pub const MAX_DRAW_ATTEMPTS: usize = 1000;

// PUBLIC COIN
// ================================================================================================

/// Pseudo-random element generator for finite fields, which is a default implementation of the
/// public coin used in non-interactive protocols.
///
/// A public coin is seeded with public data. Each draw computes `hash(seed || counter)` after
/// incrementing the counter, so the sequence of values depends only on the seed.
pub struct PublicCoin<H: Hasher> {
    seed: H::Digest,
    counter: u64,
}

impl<H: Hasher> PublicCoin<H> {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    /// Returns a new public coin instantiated with the provided `seed`.
    pub fn new(seed: &[u8]) -> Self {
        PublicCoin { seed: H::hash(seed), counter: 0 }
    }

    // DRAW METHODS
    // --------------------------------------------------------------------------------------------

    /// Returns a vector of unique integers selected from the range [0, domain_size) in the
    /// order in which they were drawn.
    ///
    /// Each candidate is the first 8 bytes of the next PRNG output, read as a little-endian
    /// integer and masked to the domain size. Candidates which were already drawn are skipped.
    ///
    /// # Errors
    /// Returns an error if:
    /// - `domain_size` is not a power of two.
    /// - `num_values` is greater than `domain_size`.
    /// - the specified number of unique integers could not be generated after 1000 calls to PRNG.
    pub fn draw_integers(
        &mut self,
        num_values: usize,
        domain_size: usize,
    ) -> Result<Vec<usize>, RandomCoinError> {
        if !domain_size.is_power_of_two() {
            return Err(RandomCoinError::DomainSizeNotPowerOfTwo(domain_size));
        }
        if num_values > domain_size {
            return Err(RandomCoinError::TooManyValues(num_values, domain_size));
        }

        // determine how many bits are needed to represent valid values in the domain
        let v_mask = (domain_size - 1) as u64;

        // draw values from PRNG until we get as many unique values as specified by num_values
        let mut values = Vec::with_capacity(num_values);
        for _ in 0..MAX_DRAW_ATTEMPTS {
            if values.len() == num_values {
                break;
            }

            // get the next pseudo-random value and read the first 8 bytes from it
            let bytes = self.next().as_bytes();
            let mut head = [0u8; 8];
            head.copy_from_slice(&bytes[..8]);

            // convert to integer and limit the integer to the number of bits which can fit
            // into the specified domain
            let value = (u64::from_le_bytes(head) & v_mask) as usize;
            if !values.contains(&value) {
                values.push(value);
            }
        }

        if values.len() < num_values {
            return Err(RandomCoinError::FailedToDrawIntegers(
                num_values,
                domain_size,
                MAX_DRAW_ATTEMPTS,
            ));
        }

        Ok(values)
    }

    // HELPER METHODS
    // --------------------------------------------------------------------------------------------

    /// Updates the state by incrementing the counter and returns hash(seed || counter)
    fn next(&mut self) -> H::Digest {
        self.counter += 1;
        H::merge_with_int(self.seed, self.counter)
    }
}

// RANDOM ELEMENT GENERATOR
// ================================================================================================

/// Deterministic generator of field elements from a secret or public seed.
///
/// The element at position `i` is obtained by concatenating hash(seed || 2i + 1) and
/// hash(seed || 2i + 2) and reducing the resulting 512-bit integer by the field modulus. Any
/// position can be computed without computing the preceding ones, which allows filling large
/// tables in parallel.
pub struct RandomElementGenerator<H: Hasher> {
    seed: H::Digest,
}

impl<H: Hasher> RandomElementGenerator<H> {
    /// Returns a new random element generator instantiated with the provided `seed`.
    pub fn new(seed: H::Digest) -> Self {
        RandomElementGenerator { seed }
    }

    /// Returns the pseudo-random field element at the specified position.
    pub fn element_at<E: FieldElement>(&self, index: u64) -> E {
        let first = H::merge_with_int(self.seed, 2 * index + 1).as_bytes();
        let second = H::merge_with_int(self.seed, 2 * index + 2).as_bytes();

        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&first);
        bytes[32..].copy_from_slice(&second);
        E::from_be_bytes_reduce(&bytes)
    }
}
