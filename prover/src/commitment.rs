// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use air::{BaseElement, Digest256, HashFn, ProofOptions};
use crypto::{ElementHasher, Hasher, MerkleTree, MerkleTreeError};
#[cfg(feature = "concurrent")]
use utils::iterators::*;
use utils::iter;

// TABLE COMMITMENT
// ================================================================================================

/// Merkle commitment to the (possibly blinded) evaluation table.
///
/// The shape of the commitment depends on the privacy enhancements:
/// * by default, the table is committed to with a single Merkle tree whose root is the
///   commitment;
/// * with multi-polynomial commitment, the table is split into `num_polynomials` contiguous
///   sub-tables with a tree each, and the value root is the hash of all sub-roots in order;
/// * with double commitment, a second tree is built over the blinding factors, and the
///   commitment is hash(value_root || blinding_root).
///
/// Leaves are hashes of the 66-byte big-endian encodings of the table values.
pub struct TableCommitment {
    value_trees: Vec<MerkleTree<HashFn>>,
    sub_roots: Vec<Digest256>,
    sub_table_size: usize,
    blinding_tree: Option<MerkleTree<HashFn>>,
    value_root: Digest256,
    root: Digest256,
}

impl TableCommitment {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    /// Commits to the provided table values.
    ///
    /// `blinding_factors` are committed to only when double commitment is enabled in `options`.
    ///
    /// # Errors
    /// Returns an error if `values` is empty.
    pub fn new(
        values: &[BaseElement],
        blinding_factors: Option<&[BaseElement]>,
        options: &ProofOptions,
    ) -> Result<Self, MerkleTreeError> {
        if values.is_empty() {
            return Err(MerkleTreeError::NoLeaves);
        }

        let privacy = options.privacy();
        let leaves = hash_leaves(values);

        let (value_trees, sub_roots, sub_table_size, value_root) = if privacy.multi_polynomial {
            let sub_table_size = (leaves.len() / options.num_polynomials()).max(1);
            let trees = leaves
                .chunks(sub_table_size)
                .map(|chunk| MerkleTree::new(chunk.to_vec()))
                .collect::<Result<Vec<_>, _>>()?;
            let sub_roots: Vec<Digest256> = trees.iter().map(|tree| *tree.root()).collect();
            let value_root = HashFn::merge_many(&sub_roots);
            (trees, sub_roots, sub_table_size, value_root)
        } else {
            let num_leaves = leaves.len();
            let tree = MerkleTree::new(leaves)?;
            let value_root = *tree.root();
            (vec![tree], Vec::new(), num_leaves, value_root)
        };

        let blinding_tree = match blinding_factors {
            Some(factors) if privacy.double_commitment => Some(MerkleTree::new(hash_leaves(factors))?),
            _ => None,
        };

        let root = match &blinding_tree {
            Some(tree) => HashFn::merge(&[value_root, *tree.root()]),
            None => value_root,
        };

        Ok(TableCommitment {
            value_trees,
            sub_roots,
            sub_table_size,
            blinding_tree,
            value_root,
            root,
        })
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the commitment to the table; this is the Merkle root of a proof.
    pub fn root(&self) -> &Digest256 {
        &self.root
    }

    /// Returns the root committing to the table values alone.
    pub fn value_root(&self) -> &Digest256 {
        &self.value_root
    }

    /// Returns roots of the sub-tables; empty unless multi-polynomial commitment is used.
    pub fn sub_roots(&self) -> &[Digest256] {
        &self.sub_roots
    }

    /// Returns the root of the tree over the blinding factors, if one was built.
    pub fn blinding_root(&self) -> Option<&Digest256> {
        self.blinding_tree.as_ref().map(|tree| tree.root())
    }

    // OPENING
    // --------------------------------------------------------------------------------------------

    /// Returns the inclusion path of the table value at the specified position.
    ///
    /// The path consists of the sibling digests in the value tree (or sub-table tree) from the
    /// leaf upward, followed by all sub-roots in multi-polynomial mode, followed by the blinding
    /// root in double commitment mode.
    ///
    /// # Errors
    /// Returns an error if `index` is outside of the table.
    pub fn open(&self, index: usize) -> Result<Vec<Digest256>, MerkleTreeError> {
        let table_size = self.sub_table_size * self.value_trees.len();
        let tree = self
            .value_trees
            .get(index / self.sub_table_size)
            .ok_or(MerkleTreeError::LeafIndexOutOfBounds(table_size, index))?;

        let mut path = tree.prove(index % self.sub_table_size)?;
        path.extend_from_slice(&self.sub_roots);
        if let Some(blinding_root) = self.blinding_root() {
            path.push(*blinding_root);
        }
        Ok(path)
    }

    /// Returns the inclusion path of the blinding factor at the specified position in the tree
    /// over the blinding factors, or `None` if no such tree was built.
    ///
    /// # Errors
    /// Returns an error if `index` is outside of the table.
    pub fn open_blinding(&self, index: usize) -> Result<Option<Vec<Digest256>>, MerkleTreeError> {
        self.blinding_tree.as_ref().map(|tree| tree.prove(index)).transpose()
    }

    /// Returns the number of digests in every inclusion path of this commitment.
    pub fn path_length(&self) -> usize {
        let local = self.sub_table_size.next_power_of_two().ilog2() as usize;
        local + self.sub_roots.len() + usize::from(self.blinding_tree.is_some())
    }
}

// HELPER FUNCTIONS
// ================================================================================================

fn hash_leaves(values: &[BaseElement]) -> Vec<Digest256> {
    iter!(values, 1024).map(HashFn::hash_element).collect()
}
