// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Contains the proof structure and its JSON wire format.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use math::{fields::p521::BaseElement, StarkField};
use serde::{Deserialize, Serialize, Serializer};

use crate::{DecodeError, Digest256, PrivacyOptions};

mod queries;
pub use queries::{BlindingOpening, QueryResponse};
use queries::QueryResponseData;

#[cfg(test)]
mod tests;

// CONSTANTS
// ================================================================================================

/// Name of the protocol carried by every proof.
pub const PROTOCOL: &str = "ZK-STARK";

// PROOF
// ================================================================================================
/// A proof generated by the Tundra prover.
///
/// A proof asserts knowledge of a witness for a statement. It contains:
/// * The hash of the canonically encoded statement.
/// * The Merkle root committing to the evaluation table.
/// * The Fiat-Shamir challenge derived from the two values above.
/// * One [QueryResponse] per queried position, in the order the positions were drawn.
/// * The response combining the statement hash, the queried values and, in double commitment
///   mode, the opened blinding factors.
/// * Metadata: the field modulus, the privacy enhancements, the protocol name, and the
///   security level.
///
/// A proof is serialized as JSON. Field elements become decimal strings, digests become
/// lowercase hex strings, and privacy flags stay JSON booleans, so no value loses precision on
/// the way through a JSON parser.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProofData")]
pub struct Proof {
    pub statement_hash: BaseElement,
    #[serde(serialize_with = "serialize_digest")]
    pub merkle_root: Digest256,
    pub challenge: BaseElement,
    pub response: BaseElement,
    pub query_responses: Vec<QueryResponse>,
    pub field_prime: String,
    pub privacy_enhancements: PrivacyOptions,
    pub protocol: String,
    pub security_level: u32,
}

impl Proof {
    // SERIALIZATION / DESERIALIZATION
    // --------------------------------------------------------------------------------------------

    /// Returns this proof serialized as compact JSON.
    pub fn to_json(&self) -> String {
        // serializing plain strings, integers and booleans into a string cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Returns this proof serialized as indented JSON.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Returns a proof read from the provided JSON string.
    ///
    /// Fields not defined by the proof format are ignored.
    ///
    /// # Errors
    /// Returns an error if:
    /// * The input is not valid JSON, a field is missing, or a field has the wrong JSON type.
    /// * A field element is not a strict decimal string smaller than the field modulus.
    /// * A digest is not a hex string of exactly 32 bytes.
    pub fn from_json(source: &str) -> Result<Self, DecodeError> {
        let data: ProofData =
            serde_json::from_str(source).map_err(|err| DecodeError::InvalidJson(err.to_string()))?;
        Proof::try_from(data)
    }

    /// Returns a proof read from an already parsed JSON value.
    ///
    /// # Errors
    /// Returns the same errors as [Proof::from_json()].
    pub fn from_value(value: serde_json::Value) -> Result<Self, DecodeError> {
        let data: ProofData =
            serde_json::from_value(value).map_err(|err| DecodeError::InvalidJson(err.to_string()))?;
        Proof::try_from(data)
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the number of queried positions.
    pub fn num_queries(&self) -> usize {
        self.query_responses.len()
    }

    /// Returns the values opened by the queries, in query order.
    pub fn query_values(&self) -> Vec<BaseElement> {
        self.query_responses.iter().map(|query| query.value).collect()
    }

    /// Returns the blinding factors opened by the queries, in query order. Queries without a
    /// blinding opening are skipped.
    pub fn blinding_values(&self) -> Vec<BaseElement> {
        self.query_responses
            .iter()
            .filter_map(|query| query.blinding.as_ref().map(|blinding| blinding.value))
            .collect()
    }

    /// Returns the terms combined into the response: the queried values followed by the
    /// opened blinding factors.
    pub fn response_terms(&self) -> Vec<BaseElement> {
        let mut terms = self.query_values();
        terms.extend(self.blinding_values());
        terms
    }

    /// Returns true if `field_prime` matches the modulus of the field used by this crate.
    pub fn has_expected_field_prime(&self) -> bool {
        self.field_prime == BaseElement::MODULUS_DECIMAL
    }
}

// WIRE FORMAT
// ================================================================================================

/// Proof as it appears on the wire, before field elements and digests are parsed.
///
/// Scalar fields are read as strings first so that parse failures for field elements and
/// digests are reported as such rather than as generic JSON errors.
#[derive(Deserialize)]
struct ProofData {
    statement_hash: String,
    merkle_root: String,
    challenge: String,
    response: String,
    query_responses: Vec<QueryResponseData>,
    field_prime: String,
    privacy_enhancements: PrivacyOptions,
    protocol: String,
    security_level: u32,
}

impl TryFrom<ProofData> for Proof {
    type Error = DecodeError;

    fn try_from(data: ProofData) -> Result<Self, Self::Error> {
        if !is_decimal(&data.field_prime) {
            return Err(DecodeError::InvalidFieldElement(format!(
                "field_prime: '{}' is not a decimal string",
                data.field_prime
            )));
        }

        Ok(Proof {
            statement_hash: parse_element("statement_hash", &data.statement_hash)?,
            merkle_root: parse_digest("merkle_root", &data.merkle_root)?,
            challenge: parse_element("challenge", &data.challenge)?,
            response: parse_element("response", &data.response)?,
            query_responses: data
                .query_responses
                .into_iter()
                .map(QueryResponse::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            field_prime: data.field_prime,
            privacy_enhancements: data.privacy_enhancements,
            protocol: data.protocol,
            security_level: data.security_level,
        })
    }
}

// HELPER FUNCTIONS
// ================================================================================================

fn parse_element(field: &str, value: &str) -> Result<BaseElement, DecodeError> {
    BaseElement::from_decimal(value)
        .map_err(|err| DecodeError::InvalidFieldElement(format!("{field}: {err}")))
}

fn parse_digest(field: &str, value: &str) -> Result<Digest256, DecodeError> {
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(value, &mut bytes)
        .map_err(|err| DecodeError::InvalidDigest(format!("{field}: {err}")))?;
    Ok(Digest256::new(bytes))
}

/// Returns true for a non-empty string of ASCII digits without leading zeros.
fn is_decimal(value: &str) -> bool {
    let digits = value.as_bytes();
    !digits.is_empty()
        && digits.iter().all(u8::is_ascii_digit)
        && (digits.len() == 1 || digits[0] != b'0')
}

fn serialize_digest<S: Serializer>(digest: &Digest256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(digest.as_array()))
}
