// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains the Tundra STARK prover and verifier.
//!
//! Tundra proves knowledge of a private [Witness] for a public [Statement]. Both sides work
//! over the field of integers modulo the Mersenne prime $2^{521} - 1$ (the NIST P-521 prime),
//! and use SHA3-256 for every commitment and Fiat-Shamir challenge.
//!
//! ## Proof generation
//! To generate a proof, build a [Statement] from a claim and (optionally) public data and a
//! threshold, collect the private values into a [Witness], and pass both to
//! [Prover::prove()]. The shape of the proof is determined by [ProofOptions]: the size of the
//! evaluation table, the number of queried positions, and the [PrivacyOptions] applied to the
//! commitment:
//!
//! * `witness_blinding` masks every table entry with a random field element;
//! * `multi_polynomial` commits to the table as several sub-tables;
//! * `double_commitment` adds a commitment to the masks (requires `witness_blinding`);
//! * `constant_time` makes the verifier evaluate every check before rejecting.
//!
//! Proofs are exchanged as JSON; field elements are encoded as decimal strings so that none of
//! their 157 digits are lost.
//!
//! ## Proof verification
//! A [Verifier] created with the same [ProofOptions] checks a proof against the statement it
//! claims to prove. Verification recomputes the statement hash, the challenge, the query
//! positions, every inclusion path, and the response; the first mismatch is reported as a
//! [VerifierError].
//!
//! # Examples
//! ```
//! use tundra::{BaseElement, PrivacyOptions, ProofOptions, Prover, Statement, Verifier, Witness};
//!
//! let statement = Statement::new("solvency")
//!     .with_public("exchange", "acme")
//!     .with_threshold(BaseElement::new(1_000_000));
//! let witness = Witness::new().with("balance", 5_000_000);
//!
//! let options = ProofOptions::new(16, 256, 4, PrivacyOptions::enhanced()).unwrap();
//! let proof = Prover::with_seed(options.clone(), [0; 32]).prove(&statement, &witness).unwrap();
//!
//! let json = proof.to_json();
//! assert!(Verifier::new(options).verify_json(&json, &statement).is_ok());
//! ```
//!
//! When the crate is compiled with `concurrent` feature enabled, table generation, Merkle tree
//! construction, and batch verification are performed in multiple threads. The number of
//! threads can be configured via `RAYON_NUM_THREADS` environment variable.

#![cfg_attr(not(feature = "std"), no_std)]

pub use air::{encoding, transcript, BaseElement, DecodeError, Digest256, HashFn};
pub use prover::{
    build_evaluation_table, crypto, math, proof, BlindingOpening, Claim, ConfigurationError,
    EncodingError,
    PrivacyOptions, Proof, ProofOptions, Prover, ProverError, QueryResponse, Statement,
    TableCommitment, Witness,
};
pub use verifier::{
    validate_structure, StructureError, VerificationReport, Verifier, VerifierError,
};

#[cfg(test)]
mod tests;
