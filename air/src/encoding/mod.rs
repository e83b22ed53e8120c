// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Canonical byte encoding of statements and witnesses.
//!
//! A bare text claim encodes as its UTF-8 bytes. Any other statement encodes as a 0xFF tag byte
//! followed by compact JSON with object keys sorted by byte order and no insignificant
//! whitespace, so that two logically equal statements always produce the same bytes and
//! therefore the same hash. The tag never occurs in UTF-8, so a text claim cannot encode to the
//! same bytes as a JSON statement.

use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};
use core::fmt::{self, Write};

use crypto::{Digest, Hasher};
use math::{fields::p521::BaseElement, FieldElement};
use serde_json::{Map, Value};

use crate::{Claim, EncodingError, HashFn, Statement, Witness};


// STATEMENT ENCODING
// ================================================================================================

/// Leading byte of every JSON-encoded statement.
pub const JSON_STATEMENT_TAG: u8 = 0xff;

/// Returns the canonical encoding of the provided statement.
///
/// # Errors
/// Returns an error if the claim is an empty string.
pub fn encode_statement(statement: &Statement) -> Result<Vec<u8>, EncodingError> {
    let claim = match statement.claim() {
        Claim::Text(text) if text.is_empty() => return Err(EncodingError::EmptyClaim),
        Claim::Text(text) => {
            if statement.public_data().is_empty() && statement.threshold().is_none() {
                return Ok(text.as_bytes().to_vec());
            }
            Value::String(text.clone())
        },
        Claim::Structured(value) => {
            if statement.public_data().is_empty() && statement.threshold().is_none() {
                return Ok(tagged_json(value));
            }
            value.clone()
        },
    };

    let mut fields = Map::new();
    fields.insert("claim".into(), claim);
    let public_data = statement
        .public_data()
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect::<Map<_, _>>();
    fields.insert("public_data".into(), Value::Object(public_data));
    if let Some(threshold) = statement.threshold() {
        fields.insert("threshold".into(), Value::String(threshold.to_string()));
    }

    Ok(tagged_json(&Value::Object(fields)))
}

fn tagged_json(value: &Value) -> Vec<u8> {
    let mut bytes = vec![JSON_STATEMENT_TAG];
    bytes.extend_from_slice(&canonical_json(value));
    bytes
}

/// Returns the canonical JSON encoding of the provided witness.
pub fn encode_witness(witness: &Witness) -> Vec<u8> {
    let fields = witness
        .values()
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect::<Map<_, _>>();
    canonical_json(&Value::Object(fields))
}

/// Returns the hash of the canonical encoding of the provided statement, read as a big-endian
/// integer and reduced by the field modulus.
///
/// # Errors
/// Returns an error if the statement cannot be encoded.
pub fn hash_statement(statement: &Statement) -> Result<BaseElement, EncodingError> {
    let encoded = encode_statement(statement)?;
    Ok(BaseElement::from_be_bytes_reduce(&HashFn::hash(&encoded).as_bytes()))
}

/// Returns the canonical JSON encoding of `value` as bytes.
pub fn canonical_json(value: &Value) -> Vec<u8> {
    Canonical(value).to_string().into_bytes()
}

// CANONICAL JSON WRITER
// ================================================================================================

/// Writes a JSON value with object keys in byte order and without whitespace.
///
/// Scalars are written by `serde_json`, so strings are escaped and numbers are formatted
/// exactly as `serde_json` does it; `1` and `1.0` stay distinct.
struct Canonical<'a>(&'a Value);

impl fmt::Display for Canonical<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{}", Canonical(item))?;
                }
                f.write_char(']')
            },
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

                f.write_char('{')?;
                for (i, (key, value)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{}:{}", Value::String(key.clone()), Canonical(value))?;
                }
                f.write_char('}')
            },
            scalar => write!(f, "{scalar}"),
        }
    }
}
