// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Contains error types for the prover.

use core::fmt;

use air::EncodingError;
use crypto::{MerkleTreeError, RandomCoinError};

// PROVER ERROR
// ================================================================================================
/// Represents an error returned by the prover during an execution of the protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProverError {
    /// This error occurs when the statement cannot be canonically encoded.
    Encoding(EncodingError),
    /// This error occurs when the evaluation table cannot be committed to or opened.
    Commitment(MerkleTreeError),
    /// This error occurs when query positions cannot be drawn from the challenge.
    QueryDerivation(RandomCoinError),
}

impl fmt::Display for ProverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoding(err) => {
                write!(f, "failed to encode the statement: {err}")
            },
            Self::Commitment(err) => {
                write!(f, "failed to commit to the evaluation table: {err}")
            },
            Self::QueryDerivation(err) => {
                write!(f, "failed to draw query positions: {err}")
            },
        }
    }
}

impl core::error::Error for ProverError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Encoding(err) => Some(err),
            Self::Commitment(err) => Some(err),
            Self::QueryDerivation(err) => Some(err),
        }
    }
}

impl From<EncodingError> for ProverError {
    fn from(err: EncodingError) -> Self {
        Self::Encoding(err)
    }
}

impl From<MerkleTreeError> for ProverError {
    fn from(err: MerkleTreeError) -> Self {
        Self::Commitment(err)
    }
}

impl From<RandomCoinError> for ProverError {
    fn from(err: RandomCoinError) -> Self {
        Self::QueryDerivation(err)
    }
}
