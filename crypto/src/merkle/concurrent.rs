// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use utils::iterators::*;

use crate::hash::Hasher;

// CONSTANTS
// ================================================================================================

pub const MIN_CONCURRENT_LEAVES: usize = 1024;

// PUBLIC FUNCTIONS
// ================================================================================================

/// Builds all internal nodes of the Merkle using all available threads and stores the
/// results in a single vector such that root of the tree is at position 1, nodes immediately
/// under the root is at positions 2 and 3 etc.
///
/// Nodes are computed one tree level at a time; within a level every node is independent of
/// the others, so the level is split across threads.
pub fn build_merkle_nodes<H: Hasher>(leaves: &[H::Digest]) -> Vec<H::Digest> {
    let n = leaves.len() / 2;
    let mut nodes = vec![H::Digest::default(); 2 * n];

    // build first row of internal nodes (parents of leaves)
    nodes[n..]
        .par_iter_mut()
        .zip(leaves.par_chunks(2))
        .for_each(|(target, pair)| *target = H::merge(&[pair[0], pair[1]]));

    // each remaining level occupies positions [start, 2 * start) and reads its children from
    // positions [2 * start, 4 * start)
    let mut start = n / 2;
    while start > 0 {
        let (parents, children) = nodes.split_at_mut(2 * start);
        parents[start..]
            .par_iter_mut()
            .zip(children[..2 * start].par_chunks(2))
            .for_each(|(target, pair)| *target = H::merge(&[pair[0], pair[1]]));
        start /= 2;
    }

    nodes
}

// TESTS
// ================================================================================================
