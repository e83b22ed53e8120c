// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains the Tundra STARK prover.
//!
//! The prover generates non-interactive zero-knowledge proofs attesting that it knows a
//! [Witness] for a public [Statement]. Proof generation proceeds as follows:
//!
//! 1. The statement is canonically encoded and hashed into a field element.
//! 2. An evaluation table is derived from the witness and the statement hash.
//! 3. If witness blinding is enabled, every table entry is masked with a random field element.
//! 4. The table is committed to with one or more Merkle trees; the root of the commitment is
//!    combined with the statement hash into the Fiat-Shamir challenge.
//! 5. Query positions are drawn from the challenge, and each position is opened.
//! 6. The response binds the statement hash and the opened values to the challenge.
//!
//! The resulting [Proof] can be serialized with [Proof::to_json()] and checked by the Tundra
//! verifier.
//!
//! When the crate is compiled with `concurrent` feature enabled, table generation and Merkle
//! tree construction are performed in multiple threads. The number of threads can be
//! configured via `RAYON_NUM_THREADS` environment variable.

#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

use alloc::{string::ToString, vec::Vec};

pub use air::{
    proof,
    proof::{BlindingOpening, Proof, QueryResponse},
    Claim, ConfigurationError, EncodingError, PrivacyOptions, ProofOptions, Statement, Witness,
};
use air::{
    encoding::hash_statement,
    proof::PROTOCOL,
    transcript::{compute_response, derive_challenge, draw_query_positions},
    BaseElement,
};
pub use crypto;
use crypto::MerkleTreeError;
pub use math;
use math::StarkField;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{event, info_span, Level};

mod commitment;
pub use commitment::TableCommitment;

mod table;
pub use table::build_evaluation_table;
use table::{apply_blinding, draw_blinding_factors};

mod errors;
pub use errors::ProverError;

#[cfg(test)]
mod tests;

// PROVER
// ================================================================================================
/// Generates proofs for statements using the specified [ProofOptions].
///
/// The only source of randomness used by the prover is the generator of blinding factors, which
/// is drawn from only when witness blinding is enabled. Without blinding, proofs are a
/// deterministic function of the statement, the witness, and the options.
pub struct Prover {
    options: ProofOptions,
    rng: StdRng,
}

impl Prover {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns a new prover which draws blinding factors from a generator seeded by the thread
    /// random number generator.
    #[cfg(feature = "std")]
    pub fn new(options: ProofOptions) -> Self {
        Prover { options, rng: StdRng::from_rng(&mut rand::rng()) }
    }

    /// Returns a new prover which draws blinding factors from a generator instantiated with the
    /// provided seed. Two provers with the same seed and options generate identical proofs.
    pub fn with_seed(options: ProofOptions, seed: [u8; 32]) -> Self {
        Prover { options, rng: StdRng::from_seed(seed) }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the options used by this prover.
    pub fn options(&self) -> &ProofOptions {
        &self.options
    }

    // PROOF GENERATION
    // --------------------------------------------------------------------------------------------

    /// Returns a proof that the prover knows `witness` for the provided `statement`.
    ///
    /// # Errors
    /// Returns an error if:
    /// * The statement cannot be encoded (e.g., its claim is empty).
    /// * Query positions could not be drawn from the challenge.
    pub fn prove(&mut self, statement: &Statement, witness: &Witness) -> Result<Proof, ProverError> {
        let trace_length = self.options.trace_length();
        let num_queries = self.options.num_queries();
        let privacy = self.options.privacy();

        let _span = info_span!("prove", trace_length, num_queries).entered();

        // 1 ----- hash the statement -------------------------------------------------------------

        let statement_hash = hash_statement(statement)?;
        event!(Level::DEBUG, "statement_hash: {}", statement_hash);

        // 2 ----- build the evaluation table -----------------------------------------------------

        let mut values = info_span!("build_evaluation_table", trace_length)
            .in_scope(|| build_evaluation_table(&statement_hash, witness, trace_length));

        // 3 ----- blind the table ----------------------------------------------------------------

        // only the blinded values are committed to; the factors are opened at queried
        // positions in double commitment mode only
        let blinding_factors = if privacy.witness_blinding {
            let rng = &mut self.rng;
            let factors = info_span!("blind_evaluation_table").in_scope(|| {
                let factors = draw_blinding_factors(rng, trace_length);
                apply_blinding(&mut values, &factors);
                factors
            });
            Some(factors)
        } else {
            None
        };

        // 4 ----- commit to the table ------------------------------------------------------------

        let commitment = info_span!(
            "commit_to_table",
            multi_polynomial = privacy.multi_polynomial,
            double_commitment = privacy.double_commitment
        )
        .in_scope(|| TableCommitment::new(&values, blinding_factors.as_deref(), &self.options))?;
        event!(Level::DEBUG, "merkle_root: {}", commitment.root());

        // 5 ----- derive the challenge -----------------------------------------------------------

        let challenge = derive_challenge(&statement_hash, commitment.root());
        event!(Level::DEBUG, "challenge: {}", challenge);

        // 6 ----- open query positions -----------------------------------------------------------

        let query_responses = {
            let span = info_span!("determine_query_positions", num_queries).entered();
            let positions = draw_query_positions(&challenge, num_queries, trace_length)?;
            event!(Level::DEBUG, "query_positions_len: {}", positions.len());
            drop(span);

            positions
                .into_iter()
                .map(|index| {
                    let proof = commitment.open(index)?;
                    let response = QueryResponse::new(index, values[index], proof);
                    match (commitment.open_blinding(index)?, blinding_factors.as_deref()) {
                        (Some(path), Some(factors)) => Ok(response
                            .with_blinding(BlindingOpening::new(factors[index], path))),
                        _ => Ok(response),
                    }
                })
                .collect::<Result<Vec<_>, MerkleTreeError>>()?
        };

        // 7 ----- compute the response and build the proof ---------------------------------------

        let mut terms: Vec<BaseElement> = query_responses.iter().map(|q| q.value).collect();
        terms.extend(
            query_responses.iter().filter_map(|q| q.blinding.as_ref().map(|b| b.value)),
        );
        let response = compute_response(statement_hash, challenge, &terms);

        Ok(Proof {
            statement_hash,
            merkle_root: *commitment.root(),
            challenge,
            response,
            query_responses,
            field_prime: BaseElement::MODULUS_DECIMAL.to_string(),
            privacy_enhancements: privacy,
            protocol: PROTOCOL.to_string(),
            security_level: self.options.security_level(),
        })
    }
}
