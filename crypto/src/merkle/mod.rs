// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use crate::{errors::MerkleTreeError, hash::Hasher};

#[cfg(feature = "concurrent")]
pub mod concurrent;


// MERKLE TREE
// ================================================================================================

/// A fully-balanced Merkle tree.
///
/// In this implementation, a Merkle tree consists of two types of nodes: leaves and internal nodes
/// (one of which is a tree root). All nodes must be instances of the digest specified by the
/// [Hasher] used to build the tree.
///
/// ```text
///       *        <- tree root
///     /   \
///    /     \
///   *       *    <- internal nodes
///  / \     / \
/// o   o   o   o  <- leaves
/// |   |   |   |
/// #   #   #   #  <- values
/// ```
///
/// Any number of leaves greater than zero is accepted. When the number of leaves is not a power
/// of two, the last leaf is repeated until it is; the padding leaves behave like any other
/// leaf, so paths for the original leaves have the same length as in a tree of the padded size.
/// A tree with a single leaf has that leaf as its root and empty paths.
///
/// A path for a leaf is the list of sibling nodes from the leaf level up to, but not including,
/// the root.
#[derive(Debug)]
pub struct MerkleTree<H: Hasher> {
    nodes: Vec<H::Digest>,
    leaves: Vec<H::Digest>,
    num_leaves: usize,
}

impl<H: Hasher> MerkleTree<H> {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    /// Returns new Merkle tree built from the provided leaves using hash function specified by
    /// the `H` generic parameter.
    ///
    /// When `concurrent` feature is enabled, the tree is built using multiple threads.
    ///
    /// # Errors
    /// Returns an error if no leaves were provided.
    pub fn new(mut leaves: Vec<H::Digest>) -> Result<Self, MerkleTreeError> {
        let num_leaves = leaves.len();
        let last_leaf = *leaves.last().ok_or(MerkleTreeError::NoLeaves)?;
        leaves.resize(num_leaves.next_power_of_two(), last_leaf);

        #[cfg(not(feature = "concurrent"))]
        let nodes = build_merkle_nodes::<H>(&leaves);

        #[cfg(feature = "concurrent")]
        let nodes = if leaves.len() < concurrent::MIN_CONCURRENT_LEAVES {
            build_merkle_nodes::<H>(&leaves)
        } else {
            concurrent::build_merkle_nodes::<H>(&leaves)
        };

        Ok(MerkleTree { nodes, leaves, num_leaves })
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the root of the tree.
    pub fn root(&self) -> &H::Digest {
        if self.leaves.len() == 1 {
            &self.leaves[0]
        } else {
            &self.nodes[1]
        }
    }

    /// Returns depth of the tree.
    ///
    /// The depth of a tree is defined as the number of edges on the path from a leaf to the root;
    /// it is equal to the number of entries in every path.
    pub fn depth(&self) -> usize {
        self.leaves.len().ilog2() as usize
    }

    /// Returns the number of leaves the tree was built from, not counting padding.
    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    /// Returns the leaves the tree was built from, not counting padding.
    pub fn leaves(&self) -> &[H::Digest] {
        &self.leaves[..self.num_leaves]
    }

    // PROVING METHODS
    // --------------------------------------------------------------------------------------------

    /// Returns a Merkle path to a leaf at the specified `index`.
    ///
    /// The path starts with the sibling of the leaf and ends with a child of the root.
    ///
    /// # Errors
    /// Returns an error if the specified index is greater than or equal to the number of leaves
    /// in the tree.
    pub fn prove(&self, index: usize) -> Result<Vec<H::Digest>, MerkleTreeError> {
        if index >= self.num_leaves {
            return Err(MerkleTreeError::LeafIndexOutOfBounds(self.num_leaves, index));
        }

        let n = self.leaves.len();
        if n == 1 {
            return Ok(Vec::new());
        }

        let mut path = Vec::with_capacity(self.depth());
        path.push(self.leaves[index ^ 1]);

        let mut index = (index + n) >> 1;
        while index > 1 {
            path.push(self.nodes[index ^ 1]);
            index >>= 1;
        }

        Ok(path)
    }

    // VERIFICATION METHODS
    // --------------------------------------------------------------------------------------------

    /// Checks whether `path` is a valid Merkle path for a `leaf` at position `index` in a tree
    /// with the specified `root`.
    ///
    /// # Errors
    /// Returns an error if the specified path does not hash to the root.
    pub fn verify(
        root: H::Digest,
        index: usize,
        leaf: H::Digest,
        path: &[H::Digest],
    ) -> Result<(), MerkleTreeError> {
        if Self::compute_root(index, leaf, path)? != root {
            return Err(MerkleTreeError::InvalidProof);
        }
        Ok(())
    }

    /// Hashes a `leaf` at position `index` together with the siblings in `path` and returns the
    /// resulting root.
    ///
    /// # Errors
    /// Returns an error if `index` does not fit into a tree of depth `path.len()`.
    pub fn compute_root(
        index: usize,
        leaf: H::Digest,
        path: &[H::Digest],
    ) -> Result<H::Digest, MerkleTreeError> {
        let depth = path.len();
        if depth < usize::BITS as usize && index >> depth != 0 {
            return Err(MerkleTreeError::LeafIndexOutOfBounds(1 << depth, index));
        }

        let mut value = leaf;
        let mut index = index;
        for sibling in path.iter() {
            value = if index & 1 == 0 {
                H::merge(&[value, *sibling])
            } else {
                H::merge(&[*sibling, value])
            };
            index >>= 1;
        }

        Ok(value)
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Returns internal nodes of a Merkle tree constructed from the provided leaves.
///
/// Builds all internal nodes of the Merkle tree using a single thread and stores the results
/// in a single vector such that root of the tree is at position 1, nodes immediately under the
/// root is at positions 2 and 3 etc. Position 0 is unused. The number of leaves must be a power
/// of two.
pub fn build_merkle_nodes<H: Hasher>(leaves: &[H::Digest]) -> Vec<H::Digest> {
    let n = leaves.len() / 2;
    let mut nodes = vec![H::Digest::default(); 2 * n];

    // build first row of internal nodes (parents of leaves)
    for (i, pair) in leaves.chunks_exact(2).enumerate() {
        nodes[n + i] = H::merge(&[pair[0], pair[1]]);
    }

    // calculate all other tree nodes
    for i in (1..n).rev() {
        nodes[i] = H::merge(&[nodes[2 * i], nodes[2 * i + 1]]);
    }

    nodes
}
