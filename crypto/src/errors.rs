// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::fmt;

// MERKLE TREE ERROR
// ================================================================================================

/// Defines errors which can occur when using Merkle trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MerkleTreeError {
    /// A tree must contain at least one leaf.
    NoLeaves,
    /// Leaf index {1} is out of bounds for a tree with {0} leaves.
    LeafIndexOutOfBounds(usize, usize),
    /// Merkle proof is not valid for the specified position.
    InvalidProof,
}

impl fmt::Display for MerkleTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLeaves => {
                write!(f, "a Merkle tree must contain at least one leaf")
            },
            Self::LeafIndexOutOfBounds(num_leaves, index) => {
                write!(f, "leaf index {index} is out of bounds for a tree with {num_leaves} leaves")
            },
            Self::InvalidProof => {
                write!(f, "Merkle proof is not valid for the specified position")
            },
        }
    }
}

impl core::error::Error for MerkleTreeError {}

// RANDOM COIN ERROR
// ================================================================================================

/// Defines errors which can occur when drawing values from a random coin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RandomCoinError {
    /// Domain size {0} is not a power of two.
    DomainSizeNotPowerOfTwo(usize),
    /// Cannot draw {0} unique values from a domain of size {1}.
    TooManyValues(usize, usize),
    /// Needed to draw {0} integers from a domain of size {1} but failed to do so after {2} tries.
    FailedToDrawIntegers(usize, usize, usize),
}

impl fmt::Display for RandomCoinError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomainSizeNotPowerOfTwo(domain_size) => {
                write!(f, "domain size {domain_size} is not a power of two")
            },
            Self::TooManyValues(num_values, domain_size) => {
                write!(f, "cannot draw {num_values} unique values from a domain of size {domain_size}")
            },
            Self::FailedToDrawIntegers(num_values, domain_size, num_tries) => {
                write!(f, "needed to draw {num_values} integers from a domain of size {domain_size} but failed to do so after {num_tries} tries")
            },
        }
    }
}

impl core::error::Error for RandomCoinError {}
