// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use air::{
    proof::{BlindingOpening, QueryResponse},
    BaseElement, Digest256, HashFn, PrivacyOptions, ProofOptions,
};
use crypto::{ElementHasher, Hasher, MerkleTree, MerkleTreeError};
use math::FieldElement;

// COMMITMENT LAYOUT
// ================================================================================================

/// Describes how inclusion paths of a proof are laid out, and recomputes the Merkle root of a
/// proof from a single query response.
///
/// A path starts with the siblings of the leaf in its value tree. In multi-polynomial mode the
/// value tree covers one of `num_polynomials` contiguous sub-tables, and the siblings are
/// followed by all sub-roots. In double commitment mode the path ends with the root of the
/// tree over the blinding factors, and every query also opens its (non-zero) blinding factor
/// against that root.
pub struct CommitmentLayout {
    trace_length: usize,
    num_sub_tables: usize,
    double_commitment: bool,
    constant_time: bool,
}

impl CommitmentLayout {
    /// Returns the layout of proofs generated with the specified options and privacy flags.
    pub fn new(options: &ProofOptions, privacy: &PrivacyOptions) -> Self {
        let num_sub_tables =
            if privacy.multi_polynomial { options.num_polynomials() } else { 1 };
        CommitmentLayout {
            trace_length: options.trace_length(),
            num_sub_tables,
            double_commitment: privacy.double_commitment,
            constant_time: privacy.constant_time,
        }
    }

    /// Returns the number of entries in a sub-table; this is the whole table when
    /// multi-polynomial commitment is not used.
    pub fn sub_table_size(&self) -> usize {
        self.trace_length / self.num_sub_tables
    }

    /// Returns the number of sibling digests before the sub-roots in every path.
    pub fn local_depth(&self) -> usize {
        self.sub_table_size().ilog2() as usize
    }

    /// Returns the expected number of digests in every path.
    pub fn path_length(&self) -> usize {
        let sub_roots = if self.num_sub_tables > 1 { self.num_sub_tables } else { 0 };
        self.local_depth() + sub_roots + usize::from(self.double_commitment)
    }

    /// Returns the Merkle root implied by the provided query response.
    ///
    /// # Errors
    /// Returns an error if:
    /// * The index is outside of the table, or the path has the wrong length.
    /// * The local path does not resolve to the sub-root it is listed with.
    /// * The blinding opening is missing in double commitment mode or present otherwise.
    /// * The blinding factor is zero or does not resolve to the blinding root.
    pub fn compute_root(&self, query: &QueryResponse) -> Result<Digest256, MerkleTreeError> {
        if query.index >= self.trace_length {
            return Err(MerkleTreeError::LeafIndexOutOfBounds(self.trace_length, query.index));
        }
        if query.proof.len() != self.path_length() {
            return Err(MerkleTreeError::InvalidProof);
        }
        if query.blinding.is_some() != self.double_commitment {
            return Err(MerkleTreeError::InvalidProof);
        }

        let leaf = HashFn::hash_element(&query.value);
        let (local_path, rest) = query.proof.split_at(self.local_depth());

        let value_root = if self.num_sub_tables > 1 {
            let sub_table_size = self.sub_table_size();
            let sub_roots = &rest[..self.num_sub_tables];
            let local_root =
                MerkleTree::<HashFn>::compute_root(query.index % sub_table_size, leaf, local_path)?;
            if !digests_eq(&local_root, &sub_roots[query.index / sub_table_size], self.constant_time)
            {
                return Err(MerkleTreeError::InvalidProof);
            }
            HashFn::merge_many(sub_roots)
        } else {
            MerkleTree::<HashFn>::compute_root(query.index, leaf, local_path)?
        };

        match (rest.last(), &query.blinding) {
            (Some(blinding_root), Some(blinding)) if self.double_commitment => {
                self.check_blinding(query.index, blinding, blinding_root)?;
                Ok(HashFn::merge(&[value_root, *blinding_root]))
            },
            _ => Ok(value_root),
        }
    }

    fn check_blinding(
        &self,
        index: usize,
        blinding: &BlindingOpening,
        blinding_root: &Digest256,
    ) -> Result<(), MerkleTreeError> {
        if blinding.value == BaseElement::ZERO {
            return Err(MerkleTreeError::InvalidProof);
        }
        if blinding.proof.len() != self.trace_length.ilog2() as usize {
            return Err(MerkleTreeError::InvalidProof);
        }
        let leaf = HashFn::hash_element(&blinding.value);
        let root = MerkleTree::<HashFn>::compute_root(index, leaf, &blinding.proof)?;
        if !digests_eq(&root, blinding_root, self.constant_time) {
            return Err(MerkleTreeError::InvalidProof);
        }
        Ok(())
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Compares two digests; in constant-time mode the comparison does not stop at the first
/// differing byte.
pub fn digests_eq(a: &Digest256, b: &Digest256, constant_time: bool) -> bool {
    if constant_time {
        utils::ct_eq(a.as_ref(), b.as_ref())
    } else {
        a == b
    }
}
