// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use math::{FieldElement, StarkField};
use serde_json::json;

use super::*;

const P521: &str = "6864797660130609714981900799081393217269435300143305409394463459185543183397656052122559640661454554977296311391480858037121987999716643812574028291115057151";

// HELPERS
// ================================================================================================

fn statement() -> Statement {
    Statement::new("solvency")
        .with_public("exchange", "acme")
        .with_public("epoch", 42)
        .with_threshold(BaseElement::new(1_000_000))
}

fn witness() -> Witness {
    Witness::new()
        .with("balance", 5_000_000)
        .with("liabilities", json!([1_200_000, 800_000]))
}

fn options(privacy: PrivacyOptions) -> Result<ProofOptions, ConfigurationError> {
    ProofOptions::new(16, 128, 4, privacy)
}

fn prove_and_verify(privacy: PrivacyOptions) -> Result<(), VerifierError> {
    let options = options(privacy).unwrap();
    let proof = Prover::with_seed(options.clone(), [5; 32]).prove(&statement(), &witness()).unwrap();
    Verifier::new(options).verify(&proof, &statement())
}

// END-TO-END
// ================================================================================================

#[test]
fn prove_and_verify_all_privacy_combinations() {
    for bits in 0u8..16 {
        let privacy =
            PrivacyOptions::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0);

        if privacy.double_commitment && !privacy.witness_blinding {
            assert_eq!(Err(ConfigurationError::UnsupportedPrivacyCombination), options(privacy));
        } else {
            assert_eq!(Ok(()), prove_and_verify(privacy), "{privacy:?}");
        }
    }
}

#[test]
fn prove_and_verify_through_json() {
    for privacy in [PrivacyOptions::none(), PrivacyOptions::enhanced()] {
        let options = options(privacy).unwrap();
        let proof =
            Prover::with_seed(options.clone(), [5; 32]).prove(&statement(), &witness()).unwrap();
        let verifier = Verifier::new(options);

        for json in [proof.to_json(), proof.to_json_pretty()] {
            let decoded = Proof::from_json(&json).unwrap();
            assert_eq!(proof, decoded);
            assert_eq!(Ok(()), verifier.verify(&decoded, &statement()));
            assert_eq!(Ok(()), verifier.verify_json(&json, &statement()));

            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(Ok(()), validate_structure(&value));
        }
    }
}

#[test]
fn prove_and_verify_with_default_options() {
    let options = ProofOptions::default();
    let mut prover = Prover::new(options.clone());
    let proof = prover.prove(&statement(), &witness()).unwrap();

    assert_eq!(32, proof.num_queries());
    assert_eq!(128, proof.security_level);
    assert_eq!(Ok(()), Verifier::new(options).verify(&proof, &statement()));
}

#[test]
fn prove_and_verify_structured_claim() {
    let statement = Statement::new(json!({"kind": "range", "bounds": [0, 100]}));
    let options = options(PrivacyOptions::all()).unwrap();
    let proof = Prover::with_seed(options.clone(), [1; 32]).prove(&statement, &witness()).unwrap();
    assert_eq!(Ok(()), Verifier::new(options).verify(&proof, &statement));
}

#[test]
fn verification_is_idempotent() {
    let options = options(PrivacyOptions::all()).unwrap();
    let proof = Prover::with_seed(options.clone(), [5; 32]).prove(&statement(), &witness()).unwrap();
    let verifier = Verifier::new(options);

    let reports: Vec<_> = (0..3).map(|_| verifier.verify(&proof, &statement())).collect();
    assert!(reports.iter().all(|report| *report == Ok(())));
}

// SOUNDNESS
// ================================================================================================

#[test]
fn reject_altered_statement() {
    let options = options(PrivacyOptions::none()).unwrap();
    let proof = Prover::with_seed(options.clone(), [5; 32]).prove(&statement(), &witness()).unwrap();
    let verifier = Verifier::new(options);

    let altered_claim = Statement::new("insolvency")
        .with_public("exchange", "acme")
        .with_public("epoch", 42)
        .with_threshold(BaseElement::new(1_000_000));
    let altered_threshold = statement().with_threshold(BaseElement::new(999_999));
    let altered_public = statement().with_public("epoch", 43);
    let added_public = statement().with_public("auditor", "kpmg");
    let float_public = statement().try_with_f64("epoch", 42.0).unwrap();

    for altered in [altered_claim, altered_threshold, altered_public, added_public, float_public] {
        assert_eq!(Err(VerifierError::StatementMismatch), verifier.verify(&proof, &altered));
    }
}

#[test]
fn reject_tampered_proofs() {
    let options = options(PrivacyOptions::new(true, true, false, false)).unwrap();
    let proof = Prover::with_seed(options.clone(), [5; 32]).prove(&statement(), &witness()).unwrap();
    let verifier = Verifier::new(options);

    let mut tampered = proof.clone();
    tampered.query_responses[0].value = tampered.query_responses[0].value + BaseElement::ONE;
    assert_eq!(Err(VerifierError::QueryInclusionFailure), verifier.verify(&tampered, &statement()));

    let mut tampered = proof.clone();
    let path = &mut tampered.query_responses[3].proof;
    path.swap(0, 1);
    if tampered != proof {
        assert_eq!(
            Err(VerifierError::QueryInclusionFailure),
            verifier.verify(&tampered, &statement())
        );
    }

    let mut tampered = proof.clone();
    tampered.response = -tampered.response;
    assert_eq!(Err(VerifierError::ResponseMismatch), verifier.verify(&tampered, &statement()));
}

#[test]
fn reject_proof_with_different_options() {
    let proof = Prover::with_seed(options(PrivacyOptions::none()).unwrap(), [5; 32])
        .prove(&statement(), &witness())
        .unwrap();

    let verifier = Verifier::new(ProofOptions::new(16, 256, 4, PrivacyOptions::none()).unwrap());
    assert!(matches!(
        verifier.verify(&proof, &statement()),
        Err(VerifierError::MalformedProof(_))
    ));
}

// WIRE FORMAT
// ================================================================================================

#[test]
fn field_prime_literal() {
    assert_eq!(P521, BaseElement::MODULUS_DECIMAL);

    let proof = Prover::with_seed(options(PrivacyOptions::none()).unwrap(), [5; 32])
        .prove(&statement(), &witness())
        .unwrap();
    assert_eq!(P521, proof.field_prime);

    let json: serde_json::Value = serde_json::from_str(&proof.to_json()).unwrap();
    assert_eq!(json!(P521), json["field_prime"]);
    assert_eq!(json!("ZK-STARK"), json["protocol"]);
    assert_eq!(json!(false), json["privacy_enhancements"]["witness_blinding"]);
}

#[test]
fn statement_hash_vector() {
    let hash = encoding::hash_statement(&Statement::new("settlement_proof")).unwrap();
    assert_eq!(
        "44620813622430180211862061922014157571665447624715181525936334993318593500646",
        hash.to_string()
    );
}

#[test]
fn reject_undecodable_proof() {
    let verifier = Verifier::new(options(PrivacyOptions::none()).unwrap());
    let result = verifier.verify_json("{\"statement_hash\": 1}", &statement());
    assert!(matches!(result, Err(VerifierError::ProofDeserializationError(_))));
}
