// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Random values for tests and benchmarks of the Tundra crates.
//!
//! When compiled to WebAssembly target, all of the functions are omitted.

pub use internal::*;

#[cfg(not(target_family = "wasm"))]
mod internal {
    use rand::prelude::*;
    use utils::Randomizable;

    // RANDOM VALUE GENERATION
    // ============================================================================================

    /// Returns a single random value of the specified type.
    ///
    /// # Panics
    /// Panics if a valid value could not be generated after 1000 tries.
    pub fn rand_value<R: Randomizable>() -> R {
        let mut rng = rand::rng();
        draw_value(&mut rng).expect("failed to generate a random value")
    }

    /// Returns a vector of random value of the specified type and the specified length.
    ///
    /// # Panics
    /// Panics if a valid value could not be generated after 1000 tries.
    pub fn rand_vector<R: Randomizable>(n: usize) -> Vec<R> {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        prng_vector(seed, n)
    }

    /// Returns a vector of value of the specified type and the specified length generated
    /// pseudo-randomly from the specified `seed`.
    ///
    /// # Panics
    /// Panics if a valid value could not be generated after 1000 tries.
    pub fn prng_vector<R: Randomizable>(seed: [u8; 32], n: usize) -> Vec<R> {
        let mut g = StdRng::from_seed(seed);
        (0..n)
            .map(|_| draw_value(&mut g).expect("failed to generate enough random values"))
            .collect()
    }

    // HELPER FUNCTIONS
    // ============================================================================================

    fn draw_value<R: Randomizable, G: RngCore>(rng: &mut G) -> Option<R> {
        let mut bytes = vec![0u8; R::VALUE_SIZE];
        for _ in 0..1000 {
            rng.fill_bytes(&mut bytes);
            if let Some(value) = R::from_random_bytes(&bytes) {
                return Some(value);
            }
        }
        None
    }
}

#[cfg(target_family = "wasm")]
mod internal {}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::{prng_vector, rand_value, rand_vector};

    #[test]
    fn rand_primitives() {
        let a = rand_value::<u64>();
        let b = rand_value::<u64>();
        assert_ne!(a, b);

        let a = rand_value::<[u8; 32]>();
        let b = rand_value::<[u8; 32]>();
        assert_ne!(a, b);
    }

    #[test]
    fn seeded_vectors_repeat() {
        let a = prng_vector::<u64>([7; 32], 16);
        let b = prng_vector::<u64>([7; 32], 16);
        assert_eq!(a, b);

        let c = prng_vector::<u64>([8; 32], 16);
        assert_ne!(a, c);

        assert_eq!(10, rand_vector::<u32>(10).len());
    }
}
