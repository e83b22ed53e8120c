// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Contains error types for the verifier.

use alloc::string::String;
use core::fmt;

use air::{DecodeError, EncodingError};

// VERIFIER ERROR
// ================================================================================================
/// Represents an error returned by the verifier during an execution of the protocol.
///
/// Variants are listed in the order in which the corresponding checks are performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifierError {
    /// This error occurs when a verifier cannot deserialize the specified proof.
    ProofDeserializationError(DecodeError),
    /// This error occurs when proof metadata is inconsistent with the verifier: the field prime
    /// or the protocol name is unexpected, the security level does not match the verifier's
    /// options, or the privacy flags form an unsupported combination.
    MalformedProof(String),
    /// This error occurs when the statement provided to the verifier cannot be encoded.
    StatementEncoding(EncodingError),
    /// This error occurs when the statement hash in the proof does not match the hash of the
    /// statement provided to the verifier.
    StatementMismatch,
    /// This error occurs when the challenge in the proof was not derived from the statement
    /// hash and the Merkle root of the proof.
    ChallengeMismatch,
    /// This error occurs when query responses do not correspond to the positions derived from
    /// the challenge, or when an inclusion path does not resolve to the Merkle root.
    QueryInclusionFailure,
    /// This error occurs when the response does not match the statement hash and the queried
    /// values combined at the challenge.
    ResponseMismatch,
}

impl fmt::Display for VerifierError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProofDeserializationError(err) => {
                write!(f, "proof deserialization failed: {err}")
            },
            Self::MalformedProof(reason) => {
                write!(f, "proof is malformed: {reason}")
            },
            Self::StatementEncoding(err) => {
                write!(f, "statement could not be encoded: {err}")
            },
            Self::StatementMismatch => {
                write!(f, "statement hash does not match the statement")
            },
            Self::ChallengeMismatch => {
                write!(f, "challenge was not derived from the statement hash and the Merkle root")
            },
            Self::QueryInclusionFailure => {
                write!(f, "query responses did not match the commitment")
            },
            Self::ResponseMismatch => {
                write!(f, "response does not match the queried values")
            },
        }
    }
}

impl core::error::Error for VerifierError {}

// STRUCTURE ERROR
// ================================================================================================
/// Represents an error returned by a structural check of a JSON proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// This error occurs when the input is not a JSON object.
    NotAnObject,
    /// This error occurs when a required field is missing.
    MissingField(&'static str),
    /// This error occurs when the protocol name does not refer to a STARK protocol.
    NotStark(String),
    /// This error occurs when a field holds a value of the wrong JSON type.
    WrongType(&'static str),
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => {
                write!(f, "proof must be a JSON object")
            },
            Self::MissingField(field) => {
                write!(f, "proof is missing required field '{field}'")
            },
            Self::NotStark(protocol) => {
                write!(f, "protocol '{protocol}' is not a STARK protocol")
            },
            Self::WrongType(field) => {
                write!(f, "field '{field}' has the wrong type")
            },
        }
    }
}

impl core::error::Error for StructureError {}
