// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains components needed to describe what a Tundra proof is about and how it is
//! exchanged.
//!
//! A proof attests to a [Statement]: a claim, a map of public data, and an optional threshold.
//! The statement is encoded canonically ([encoding]) and hashed into a field element; the
//! prover's private inputs form a [Witness], which never leaves the prover.
//!
//! Both parties agree on [ProofOptions] (number of queries, table size, number of
//! sub-polynomials) and on [PrivacyOptions]. The [transcript] module derives the Fiat-Shamir
//! challenge, the query positions, and the response relation from public data only, so the
//! prover and the verifier compute them identically.
//!
//! Finally, [Proof](proof::Proof) describes the proof structure together with its JSON wire
//! format, in which field elements are decimal strings and digests are hex strings.

#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

use crypto::{hashers::Sha3_256, ByteDigest};
pub use math::fields::p521::BaseElement;

pub mod encoding;
pub mod proof;
pub mod transcript;

mod errors;
pub use errors::{ConfigurationError, DecodeError, EncodingError};

mod options;
pub use options::{PrivacyOptions, ProofOptions};

mod statement;
pub use statement::{Claim, Statement, Witness};

// TYPE ALIASES
// ================================================================================================

/// Hash function used for every commitment and challenge in the protocol.
pub type HashFn = Sha3_256<BaseElement>;

/// Digest produced by [HashFn].
pub type Digest256 = ByteDigest<32>;
