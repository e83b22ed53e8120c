// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains the Tundra STARK verifier.
//!
//! The verifier checks that a [Proof] was generated for a given [Statement]. Verification is
//! a sequence of checks, each of which rejects the proof with a specific [VerifierError]:
//!
//! 0. Structure - the field prime, the protocol name, the security level, and the combination
//!    of privacy flags must be the ones expected by the verifier.
//! 1. Statement hash - the hash of the canonically encoded statement must match the proof.
//! 2. Challenge - the challenge must be derived from the statement hash and the Merkle root.
//! 3. Queries - query positions are re-derived from the challenge, and every opened value must
//!    resolve to the Merkle root through its inclusion path. In double commitment mode every
//!    query also opens a non-zero blinding factor against the blinding root.
//! 4. Response - the response must equal the statement hash, the opened values, and the opened
//!    blinding factors combined at the challenge.
//!
//! Verification has no side effects; verifying the same proof twice gives the same result.
//! When the proof requests constant-time verification, all checks are evaluated before the
//! first failure is reported.

#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use alloc::{string::String, vec::Vec};

use air::{
    encoding::hash_statement,
    proof::{QueryResponse, PROTOCOL},
    transcript::{compute_response, derive_challenge, draw_query_positions},
    BaseElement, PrivacyOptions,
};
pub use air::{proof::Proof, ProofOptions, Statement};
pub use crypto;
pub use math;
use math::StarkField;
use tracing::{debug, info_span, warn};
#[cfg(feature = "concurrent")]
use utils::iterators::*;
use utils::iter;

mod commitment;
use commitment::{digests_eq, CommitmentLayout};

mod errors;
pub use errors::{StructureError, VerifierError};

mod structure;
pub use structure::validate_structure;


// VERIFIER
// ================================================================================================
/// Verifies proofs generated with the specified [ProofOptions].
///
/// The options fix the table size, the number of queries, and the number of polynomials. The
/// privacy flags are read from each proof.
#[derive(Debug, Clone)]
pub struct Verifier {
    options: ProofOptions,
}

/// Outcome of a verification, with the time it took.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationReport {
    pub valid: bool,
    pub reason: Option<VerifierError>,
    pub duration_ms: f64,
    pub message: String,
}

impl Verifier {
    /// Returns a new verifier for proofs generated with the specified options.
    pub fn new(options: ProofOptions) -> Self {
        Verifier { options }
    }

    /// Returns the options used by this verifier.
    pub fn options(&self) -> &ProofOptions {
        &self.options
    }

    // VERIFICATION
    // --------------------------------------------------------------------------------------------

    /// Verifies that `proof` was generated for `statement`.
    ///
    /// # Errors
    /// Returns an error describing the first check the proof failed.
    pub fn verify(&self, proof: &Proof, statement: &Statement) -> Result<(), VerifierError> {
        let _span = info_span!(
            "verify",
            trace_length = self.options.trace_length(),
            num_queries = self.options.num_queries()
        )
        .entered();

        let result = self.check_proof(proof, statement);
        if let Err(err) = &result {
            warn!("proof rejected: {err}");
        }
        result
    }

    /// Parses a JSON proof and verifies that it was generated for `statement`.
    ///
    /// # Errors
    /// Returns an error if the proof cannot be parsed or if it fails verification.
    pub fn verify_json(&self, proof: &str, statement: &Statement) -> Result<(), VerifierError> {
        let proof = Proof::from_json(proof).map_err(VerifierError::ProofDeserializationError)?;
        self.verify(&proof, statement)
    }

    /// Verifies a proof and reports the outcome together with the time verification took.
    #[cfg(feature = "std")]
    pub fn verify_with_report(&self, proof: &Proof, statement: &Statement) -> VerificationReport {
        use alloc::string::ToString;

        let now = std::time::Instant::now();
        let result = self.verify(proof, statement);
        let duration_ms = now.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(()) => VerificationReport {
                valid: true,
                reason: None,
                duration_ms,
                message: "proof is valid".to_string(),
            },
            Err(err) => VerificationReport {
                valid: false,
                message: err.to_string(),
                reason: Some(err),
                duration_ms,
            },
        }
    }

    /// Verifies every `(proof, statement)` pair and returns the results in the same order.
    ///
    /// When `concurrent` feature is enabled, proofs are verified in multiple threads.
    pub fn verify_batch(&self, batch: &[(Proof, Statement)]) -> Vec<Result<(), VerifierError>> {
        iter!(batch).map(|(proof, statement)| self.verify(proof, statement)).collect()
    }

    // HELPER METHODS
    // --------------------------------------------------------------------------------------------

    fn check_proof(&self, proof: &Proof, statement: &Statement) -> Result<(), VerifierError> {
        // 0 ----- check proof structure ----------------------------------------------------------

        self.check_structure(proof)?;
        let privacy = proof.privacy_enhancements;
        let mut checks = Checks::new(privacy.constant_time);
        debug!("structure check passed");

        // 1 ----- check statement hash -----------------------------------------------------------

        let statement_hash = hash_statement(statement).map_err(VerifierError::StatementEncoding)?;
        checks.ensure(
            elements_eq(&statement_hash, &proof.statement_hash, privacy.constant_time),
            VerifierError::StatementMismatch,
        )?;
        debug!("statement hash check done");

        // 2 ----- check challenge ----------------------------------------------------------------

        let challenge = derive_challenge(&proof.statement_hash, &proof.merkle_root);
        checks.ensure(
            elements_eq(&challenge, &proof.challenge, privacy.constant_time),
            VerifierError::ChallengeMismatch,
        )?;
        debug!("challenge check done");

        // 3 ----- check query responses ----------------------------------------------------------

        let queries_ok = self.check_queries(proof, &challenge, &privacy);
        checks.ensure(queries_ok, VerifierError::QueryInclusionFailure)?;
        debug!("query check done");

        // 4 ----- check response -----------------------------------------------------------------

        let response = compute_response(proof.statement_hash, challenge, &proof.response_terms());
        checks.ensure(
            elements_eq(&response, &proof.response, privacy.constant_time),
            VerifierError::ResponseMismatch,
        )?;
        debug!("response check done");

        checks.finish()
    }

    fn check_structure(&self, proof: &Proof) -> Result<(), VerifierError> {
        if !proof.has_expected_field_prime() {
            return Err(VerifierError::MalformedProof(format!(
                "unexpected field prime {}",
                proof.field_prime
            )));
        }
        if proof.protocol != PROTOCOL {
            return Err(VerifierError::MalformedProof(format!(
                "unexpected protocol '{}'",
                proof.protocol
            )));
        }
        let security_level = self.options.security_level();
        if proof.security_level != security_level {
            return Err(VerifierError::MalformedProof(format!(
                "expected security level {security_level}, but was {}",
                proof.security_level
            )));
        }
        proof
            .privacy_enhancements
            .validate()
            .map_err(|err| VerifierError::MalformedProof(format!("{err}")))
    }

    /// Returns true if the query responses open the positions derived from the challenge, in
    /// order, and all of them resolve to the Merkle root of the proof.
    fn check_queries(&self, proof: &Proof, challenge: &BaseElement, privacy: &PrivacyOptions) -> bool {
        let num_queries = self.options.num_queries();
        let positions =
            match draw_query_positions(challenge, num_queries, self.options.trace_length()) {
                Ok(positions) => positions,
                Err(_) => return false,
            };
        if proof.query_responses.len() != positions.len() {
            return false;
        }

        let layout = CommitmentLayout::new(&self.options, privacy);
        let query_ok = |(query, position): (&QueryResponse, &usize)| {
            let root_ok = match layout.compute_root(query) {
                Ok(root) => digests_eq(&root, &proof.merkle_root, privacy.constant_time),
                Err(_) => false,
            };
            (query.index == *position) & root_ok
        };

        let mut queries = proof.query_responses.iter().zip(positions.iter());
        if privacy.constant_time {
            queries.fold(true, |acc, query| acc & query_ok(query))
        } else {
            queries.all(query_ok)
        }
    }
}

// CHECK ACCUMULATOR
// ================================================================================================

/// Tracks the outcome of verification checks.
///
/// In constant-time mode a failed check is recorded and verification continues, so that every
/// check is evaluated; the first recorded failure is reported at the end. Otherwise the first
/// failure is returned immediately.
struct Checks {
    constant_time: bool,
    first_failure: Option<VerifierError>,
}

impl Checks {
    fn new(constant_time: bool) -> Self {
        Checks { constant_time, first_failure: None }
    }

    fn ensure(&mut self, passed: bool, err: VerifierError) -> Result<(), VerifierError> {
        if !passed {
            if !self.constant_time {
                return Err(err);
            }
            self.first_failure.get_or_insert(err);
        }
        Ok(())
    }

    fn finish(self) -> Result<(), VerifierError> {
        match self.first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// HELPER FUNCTIONS
// ================================================================================================

fn elements_eq(a: &BaseElement, b: &BaseElement, constant_time: bool) -> bool {
    if constant_time {
        a.ct_eq(b)
    } else {
        a == b
    }
}
