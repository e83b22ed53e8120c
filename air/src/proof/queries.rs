// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::{string::String, vec::Vec};

use math::fields::p521::BaseElement;
use serde::{ser::SerializeSeq, Deserialize, Serialize, Serializer};

use super::{parse_digest, parse_element};
use crate::{DecodeError, Digest256};

// QUERY RESPONSE
// ================================================================================================
/// Decommitment of a single position of the committed table.
///
/// A query response contains the table position, the committed value at that position, and an
/// inclusion path which authenticates the value against the Merkle root of the proof. The path
/// lists sibling digests from the leaf level upward; in multi-polynomial and double commitment
/// modes it is followed by the sub-roots and the blinding root respectively.
///
/// In double commitment mode the response also opens the blinding factor at the same position
/// against the blinding root.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct QueryResponse {
    pub index: usize,
    pub value: BaseElement,
    #[serde(serialize_with = "serialize_path")]
    pub proof: Vec<Digest256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blinding: Option<BlindingOpening>,
}

impl QueryResponse {
    /// Returns a new query response for the specified position.
    pub fn new(index: usize, value: BaseElement, proof: Vec<Digest256>) -> Self {
        QueryResponse { index, value, proof, blinding: None }
    }

    /// Returns this query response with the blinding factor at the same position opened.
    pub fn with_blinding(mut self, blinding: BlindingOpening) -> Self {
        self.blinding = Some(blinding);
        self
    }
}

// BLINDING OPENING
// ================================================================================================
/// Blinding factor at a queried position together with its inclusion path in the tree built
/// over all blinding factors.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct BlindingOpening {
    pub value: BaseElement,
    #[serde(serialize_with = "serialize_path")]
    pub proof: Vec<Digest256>,
}

impl BlindingOpening {
    pub fn new(value: BaseElement, proof: Vec<Digest256>) -> Self {
        BlindingOpening { value, proof }
    }
}

// WIRE FORMAT
// ================================================================================================

/// Query response as it appears on the wire, before the values are parsed.
#[derive(Deserialize)]
pub(super) struct QueryResponseData {
    index: usize,
    value: String,
    proof: Vec<String>,
    #[serde(default)]
    blinding: Option<BlindingOpeningData>,
}

#[derive(Deserialize)]
pub(super) struct BlindingOpeningData {
    value: String,
    proof: Vec<String>,
}

impl TryFrom<QueryResponseData> for QueryResponse {
    type Error = DecodeError;

    fn try_from(data: QueryResponseData) -> Result<Self, Self::Error> {
        let value = parse_element("query_responses.value", &data.value)?;
        let proof = parse_path("query_responses.proof", &data.proof)?;
        let blinding = data.blinding.map(BlindingOpening::try_from).transpose()?;
        Ok(QueryResponse { index: data.index, value, proof, blinding })
    }
}

impl TryFrom<BlindingOpeningData> for BlindingOpening {
    type Error = DecodeError;

    fn try_from(data: BlindingOpeningData) -> Result<Self, Self::Error> {
        let value = parse_element("query_responses.blinding.value", &data.value)?;
        let proof = parse_path("query_responses.blinding.proof", &data.proof)?;
        Ok(BlindingOpening { value, proof })
    }
}

fn parse_path(field: &str, path: &[String]) -> Result<Vec<Digest256>, DecodeError> {
    path.iter().map(|node| parse_digest(field, node)).collect()
}

fn serialize_path<S: Serializer>(path: &[Digest256], serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(path.len()))?;
    for node in path {
        seq.serialize_element(&hex::encode(node.as_array()))?;
    }
    seq.end()
}
