// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::{string::ToString, vec::Vec};

use crypto::Hasher;
use math::{fields::p521::BaseElement, FieldElement, StarkField};
use serde_json::Value;

use super::*;
use crate::HashFn;

const BIG_VALUE: &str = "6864797660130609714981900799081393217269435300143305409394463459185543183397656052122559640661454554977296311391480858037121987999716643812574028291115057150";

fn build_proof(privacy: PrivacyOptions) -> Proof {
    let big = BaseElement::from_decimal(BIG_VALUE).unwrap();
    let query_responses = (0..3u64)
        .map(|i| {
            let path = (0..4u64).map(|j| HashFn::hash(&(i * 10 + j).to_le_bytes())).collect();
            let query = QueryResponse::new(i as usize * 5, big - BaseElement::from(i), path);
            if privacy.double_commitment {
                let path = (0..4u64).map(|j| HashFn::hash(&(i * 20 + j).to_le_bytes())).collect();
                query.with_blinding(BlindingOpening::new(BaseElement::from(i + 7), path))
            } else {
                query
            }
        })
        .collect();

    Proof {
        statement_hash: big,
        merkle_root: HashFn::hash(b"root"),
        challenge: big.square(),
        response: -BaseElement::from(12345u64),
        query_responses,
        field_prime: BaseElement::MODULUS_DECIMAL.to_string(),
        privacy_enhancements: privacy,
        protocol: PROTOCOL.to_string(),
        security_level: 96,
    }
}

// SERIALIZATION
// ================================================================================================

#[test]
fn json_round_trip() {
    let proof = build_proof(PrivacyOptions::all());
    assert_eq!(proof, Proof::from_json(&proof.to_json()).unwrap());
    assert_eq!(proof, Proof::from_json(&proof.to_json_pretty()).unwrap());
}

#[test]
fn json_keeps_large_integers_exact() {
    let proof = build_proof(PrivacyOptions::none());
    let json: Value = serde_json::from_str(&proof.to_json()).unwrap();

    assert_eq!(Value::String(BIG_VALUE.into()), json["statement_hash"]);
    assert_eq!(Value::String(BaseElement::MODULUS_DECIMAL.into()), json["field_prime"]);
    assert!(BIG_VALUE.len() > 70);

    let decoded = Proof::from_json(&proof.to_json()).unwrap();
    assert_eq!(BIG_VALUE, decoded.statement_hash.to_string());
    assert_eq!(decoded.response, -BaseElement::from(12345u64));
}

#[test]
fn json_digests_are_lowercase_hex() {
    let proof = build_proof(PrivacyOptions::none());
    let json: Value = serde_json::from_str(&proof.to_json()).unwrap();

    let root = json["merkle_root"].as_str().unwrap();
    assert_eq!(64, root.len());
    assert!(root.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    assert_eq!(proof.merkle_root.to_string(), root);

    let path = json["query_responses"][1]["proof"].as_array().unwrap();
    assert_eq!(4, path.len());
    assert_eq!(Value::from(5), json["query_responses"][1]["index"]);
}

#[test]
fn json_keeps_booleans() {
    let privacy = PrivacyOptions::new(true, false, true, true);
    let proof = build_proof(privacy);

    for encoded in [proof.to_json(), proof.to_json_pretty()] {
        let json: Value = serde_json::from_str(&encoded).unwrap();
        let flags = &json["privacy_enhancements"];
        assert_eq!(Value::Bool(true), flags["witness_blinding"]);
        assert_eq!(Value::Bool(false), flags["multi_polynomial"]);
        assert_eq!(Value::Bool(true), flags["double_commitment"]);
        assert_eq!(Value::Bool(true), flags["constant_time"]);
        assert_eq!(privacy, Proof::from_json(&encoded).unwrap().privacy_enhancements);
    }
}

#[test]
fn json_ignores_unknown_fields() {
    let proof = build_proof(PrivacyOptions::none());
    let mut json: Value = serde_json::from_str(&proof.to_json()).unwrap();
    json["generated_by"] = Value::from("cli");
    json["privacy_enhancements"]["extra_flag"] = Value::Bool(true);
    assert_eq!(proof, Proof::from_value(json).unwrap());
}

// DESERIALIZATION ERRORS
// ================================================================================================

fn decode_modified(modify: impl FnOnce(&mut Value)) -> Result<Proof, DecodeError> {
    let proof = build_proof(PrivacyOptions::none());
    let mut json: Value = serde_json::from_str(&proof.to_json()).unwrap();
    modify(&mut json);
    Proof::from_json(&json.to_string())
}

#[test]
fn reject_string_booleans() {
    let result = decode_modified(|json| {
        json["privacy_enhancements"]["witness_blinding"] = Value::from("true");
    });
    assert!(matches!(result, Err(DecodeError::InvalidJson(_))));
}

#[test]
fn reject_numbers_in_place_of_digit_strings() {
    let result = decode_modified(|json| json["challenge"] = Value::from(12345u64));
    assert!(matches!(result, Err(DecodeError::InvalidJson(_))));
}

#[test]
fn reject_invalid_field_elements() {
    let result = decode_modified(|json| {
        json["response"] = Value::from(BaseElement::MODULUS_DECIMAL);
    });
    assert!(matches!(result, Err(DecodeError::InvalidFieldElement(_))));

    let result = decode_modified(|json| json["statement_hash"] = Value::from("0012"));
    assert!(matches!(result, Err(DecodeError::InvalidFieldElement(_))));

    let result = decode_modified(|json| {
        json["query_responses"][0]["value"] = Value::from("-1");
    });
    assert!(matches!(result, Err(DecodeError::InvalidFieldElement(_))));

    let result = decode_modified(|json| json["field_prime"] = Value::from("p"));
    assert!(matches!(result, Err(DecodeError::InvalidFieldElement(_))));
}

#[test]
fn reject_invalid_digests() {
    let result = decode_modified(|json| json["merkle_root"] = Value::from("abcd"));
    assert!(matches!(result, Err(DecodeError::InvalidDigest(_))));

    let result = decode_modified(|json| {
        json["query_responses"][2]["proof"][0] = Value::from("zz".repeat(32));
    });
    assert!(matches!(result, Err(DecodeError::InvalidDigest(_))));
}

#[test]
fn reject_missing_fields() {
    let result = decode_modified(|json| {
        json.as_object_mut().unwrap().remove("security_level");
    });
    assert!(matches!(result, Err(DecodeError::InvalidJson(_))));

    assert!(matches!(Proof::from_json("{not json"), Err(DecodeError::InvalidJson(_))));
}

#[test]
fn proof_accessors() {
    let proof = build_proof(PrivacyOptions::none());
    assert_eq!(3, proof.num_queries());
    let values: Vec<BaseElement> = proof.query_responses.iter().map(|q| q.value).collect();
    assert_eq!(values, proof.query_values());
    assert_eq!(values, proof.response_terms());
    assert!(proof.blinding_values().is_empty());
    assert!(proof.has_expected_field_prime());
}

#[test]
fn blinding_openings_on_the_wire() {
    let proof = build_proof(PrivacyOptions::none());
    let json: Value = serde_json::from_str(&proof.to_json()).unwrap();
    assert!(json["query_responses"][0].get("blinding").is_none());

    let proof = build_proof(PrivacyOptions::all());
    let json: Value = serde_json::from_str(&proof.to_json()).unwrap();
    assert_eq!(Value::String("8".into()), json["query_responses"][1]["blinding"]["value"]);
    assert_eq!(4, json["query_responses"][1]["blinding"]["proof"].as_array().unwrap().len());

    let factors: Vec<BaseElement> = (7..10u64).map(BaseElement::from).collect();
    assert_eq!(factors, proof.blinding_values());
    let mut terms = proof.query_values();
    terms.extend(factors);
    assert_eq!(terms, proof.response_terms());

    let result = decode_modified(|json| {
        json["query_responses"][0]["blinding"] = serde_json::json!({"value": "abc", "proof": []});
    });
    assert!(matches!(result, Err(DecodeError::InvalidFieldElement(_))));
}
