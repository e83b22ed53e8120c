// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::marker::PhantomData;

use math::FieldElement;
use sha3::Digest;

use super::{ByteDigest, ElementHasher, Hasher};

// SHA3 WITH 256-BIT OUTPUT
// ================================================================================================

/// Implementation of the [Hasher](super::Hasher) trait for SHA3 hash function with 256-bit
/// output.
#[derive(Debug, PartialEq, Eq)]
pub struct Sha3_256<B: FieldElement>(PhantomData<B>);

impl<B: FieldElement> Hasher for Sha3_256<B> {
    type Digest = ByteDigest<32>;

    fn hash(bytes: &[u8]) -> Self::Digest {
        ByteDigest::new(sha3::Sha3_256::digest(bytes).into())
    }

    fn merge(values: &[Self::Digest; 2]) -> Self::Digest {
        Self::merge_many(values)
    }

    fn merge_many(values: &[Self::Digest]) -> Self::Digest {
        let mut hasher = sha3::Sha3_256::new();
        for value in values.iter() {
            hasher.update(value.as_ref());
        }
        ByteDigest::new(hasher.finalize().into())
    }

    fn merge_with_int(seed: Self::Digest, value: u64) -> Self::Digest {
        let mut data = [0; 40];
        data[..32].copy_from_slice(seed.as_ref());
        data[32..].copy_from_slice(&value.to_le_bytes());
        ByteDigest::new(sha3::Sha3_256::digest(data).into())
    }
}

impl<B: FieldElement> ElementHasher for Sha3_256<B> {
    type BaseField = B;
}
