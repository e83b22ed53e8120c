// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains cryptographic primitives used in Tundra STARK prover and verifier.
//!
//! # Hash
//! The [Hasher] trait specifies the hash interface used throughout the protocol. The only
//! implementation is SHA3 with 256-bit output ([hashers::Sha3_256]).
//!
//! # Merkle
//! [MerkleTree] is a binary Merkle tree over digests produced by a [Hasher]. The tree accepts
//! any non-zero number of leaves and pads to the next power of two by repeating the last leaf.
//!
//! # Random
//! [PublicCoin] draws pseudo-random integers from a seed using `hash(seed || counter)`, and
//! [RandomElementGenerator] derives field elements at arbitrary positions from a seed.
#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

mod hash;
pub use hash::{ByteDigest, Digest, ElementHasher, Hasher};
pub mod hashers {
    //! Contains implementations of currently supported hash functions.

    pub use super::hash::Sha3_256;
}

mod merkle;
#[cfg(feature = "concurrent")]
pub use merkle::concurrent;
pub use merkle::{build_merkle_nodes, MerkleTree};

mod random;
pub use random::{PublicCoin, RandomElementGenerator, MAX_DRAW_ATTEMPTS};

mod errors;
pub use errors::{MerkleTreeError, RandomCoinError};
