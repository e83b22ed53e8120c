// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::Value;

use crate::StructureError;

// CONSTANTS
// ================================================================================================

const REQUIRED_FIELDS: [&str; 9] = [
    "statement_hash",
    "merkle_root",
    "challenge",
    "response",
    "query_responses",
    "field_prime",
    "privacy_enhancements",
    "protocol",
    "security_level",
];

const BIG_INTEGER_FIELDS: [&str; 4] = ["statement_hash", "challenge", "response", "field_prime"];

const PRIVACY_FLAGS: [&str; 4] =
    ["witness_blinding", "multi_polynomial", "double_commitment", "constant_time"];

// STRUCTURE VALIDATION
// ================================================================================================

/// Checks the shape of a JSON proof without verifying it.
///
/// The check passes if every required field is present, the protocol name contains `STARK`,
/// the four privacy flags are JSON booleans, and the big-integer fields are strings. Values
/// themselves are not parsed; a proof which passes this check can still fail to decode.
///
/// # Errors
/// Returns the first structural problem found.
pub fn validate_structure(proof: &Value) -> Result<(), StructureError> {
    let fields = proof.as_object().ok_or(StructureError::NotAnObject)?;

    for field in REQUIRED_FIELDS {
        if !fields.contains_key(field) {
            return Err(StructureError::MissingField(field));
        }
    }

    let protocol = fields["protocol"].as_str().ok_or(StructureError::WrongType("protocol"))?;
    if !protocol.contains("STARK") {
        return Err(StructureError::NotStark(protocol.into()));
    }

    let flags = fields["privacy_enhancements"]
        .as_object()
        .ok_or(StructureError::WrongType("privacy_enhancements"))?;
    for flag in PRIVACY_FLAGS {
        match flags.get(flag) {
            Some(Value::Bool(_)) => {},
            Some(_) => return Err(StructureError::WrongType(flag)),
            None => return Err(StructureError::MissingField(flag)),
        }
    }

    for field in BIG_INTEGER_FIELDS {
        if !fields[field].is_string() {
            return Err(StructureError::WrongType(field));
        }
    }

    if !fields["query_responses"].is_array() {
        return Err(StructureError::WrongType("query_responses"));
    }

    Ok(())
}
