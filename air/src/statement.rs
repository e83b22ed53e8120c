// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt;

use math::fields::p521::BaseElement;
use serde_json::{Number, Value};

use crate::EncodingError;

// CLAIM
// ================================================================================================

/// The assertion a proof is about.
///
/// A claim is either a plain piece of text or a structured JSON value. Structured claims are
/// encoded canonically (sorted keys, no whitespace) before hashing.
#[derive(Debug, Clone, PartialEq)]
pub enum Claim {
    Text(String),
    Structured(Value),
}

impl From<&str> for Claim {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Claim {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Value> for Claim {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

// STATEMENT
// ================================================================================================

/// Public description of what is being proven.
///
/// A statement consists of a claim, a map of public data, and an optional threshold. It is
/// built once and then only read; builder methods consume `self`.
///
/// ```
/// # use tundra_air::{BaseElement, Statement};
/// let statement = Statement::new("solvency")
///     .with_public("exchange", "acme")
///     .with_public("epoch", 42)
///     .with_threshold(BaseElement::new(1_000_000));
/// assert_eq!(2, statement.public_data().len());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    claim: Claim,
    public_data: BTreeMap<String, Value>,
    threshold: Option<BaseElement>,
}

impl Statement {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns a statement for the specified claim with no public data and no threshold.
    pub fn new(claim: impl Into<Claim>) -> Self {
        Statement {
            claim: claim.into(),
            public_data: BTreeMap::new(),
            threshold: None,
        }
    }

    /// Returns a copy of this statement with `value` stored under `key` in the public data.
    ///
    /// A value already stored under the same key is replaced.
    pub fn with_public(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.public_data.insert(key.into(), value.into());
        self
    }

    /// Returns a copy of this statement with the floating point `value` stored under `key` in
    /// the public data.
    ///
    /// # Errors
    /// Returns an error if `value` is NaN or infinite.
    pub fn try_with_f64(mut self, key: impl Into<String>, value: f64) -> Result<Self, EncodingError> {
        let key = key.into();
        let value = finite_number(&key, value)?;
        self.public_data.insert(key, value);
        Ok(self)
    }

    /// Returns a copy of this statement with the specified threshold.
    pub fn with_threshold(mut self, threshold: BaseElement) -> Self {
        self.threshold = Some(threshold);
        self
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    pub fn claim(&self) -> &Claim {
        &self.claim
    }

    pub fn public_data(&self) -> &BTreeMap<String, Value> {
        &self.public_data
    }

    pub fn threshold(&self) -> Option<BaseElement> {
        self.threshold
    }
}

// WITNESS
// ================================================================================================

/// Private inputs of the prover.
///
/// A witness is consumed by the prover only; it never appears in a proof and has no serialized
/// form. Its [Debug] output lists keys but not values.
#[derive(Clone, Default, PartialEq)]
pub struct Witness {
    values: BTreeMap<String, Value>,
}

impl Witness {
    /// Returns an empty witness.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value, and returns `self` for
    /// chaining.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Consuming variant of [Witness::insert()].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Stores the floating point `value` under `key`.
    ///
    /// # Errors
    /// Returns an error if `value` is NaN or infinite.
    pub fn try_insert_f64(&mut self, key: impl Into<String>, value: f64) -> Result<&mut Self, EncodingError> {
        let key = key.into();
        let value = finite_number(&key, value)?;
        self.values.insert(key, value);
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }
}

impl fmt::Debug for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&String> = self.values.keys().collect();
        f.debug_struct("Witness").field("keys", &keys).finish_non_exhaustive()
    }
}

// HELPER FUNCTIONS
// ================================================================================================

fn finite_number(key: &str, value: f64) -> Result<Value, EncodingError> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| EncodingError::NonFiniteNumber(key.into()))
}
