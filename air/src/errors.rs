// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::string::String;
use core::fmt;

// ENCODING ERROR
// ================================================================================================
/// Represents an error returned when a statement or a witness cannot be canonically encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// This error occurs when a statement is built from an empty text claim.
    EmptyClaim,
    /// This error occurs when a NaN or an infinite number is inserted under the specified key.
    NonFiniteNumber(String),
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyClaim => {
                write!(f, "claim must not be empty")
            },
            Self::NonFiniteNumber(key) => {
                write!(f, "value for key '{key}' is not a finite number")
            },
        }
    }
}

impl core::error::Error for EncodingError {}

// DECODE ERROR
// ================================================================================================
/// Represents an error returned when a proof cannot be parsed from its JSON representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// This error occurs when the input is not valid JSON or when a field has the wrong JSON
    /// type (e.g., a privacy flag which is not a boolean).
    InvalidJson(String),
    /// This error occurs when a field element is not a strict decimal string or when its value
    /// is not smaller than the field modulus.
    InvalidFieldElement(String),
    /// This error occurs when a digest is not a hex string encoding exactly 32 bytes.
    InvalidDigest(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson(err) => {
                write!(f, "proof is not well-formed JSON: {err}")
            },
            Self::InvalidFieldElement(err) => {
                write!(f, "proof contains an invalid field element: {err}")
            },
            Self::InvalidDigest(err) => {
                write!(f, "proof contains an invalid digest: {err}")
            },
        }
    }
}

impl core::error::Error for DecodeError {}

// CONFIGURATION ERROR
// ================================================================================================
/// Represents an error returned during proof options validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// This error occurs when the trace length is not a power of two.
    TraceLengthNotPowerOfTwo(usize),
    /// This error occurs when the trace length is smaller than the minimum allowed.
    TraceLengthTooSmall(usize, usize),
    /// This error occurs when the trace length is greater than the maximum allowed.
    TraceLengthTooBig(usize, usize),
    /// This error occurs when the number of queries is zero.
    TooFewQueries,
    /// This error occurs when the number of queries is greater than the maximum allowed.
    TooManyQueries(usize, usize),
    /// This error occurs when the number of polynomials is not a power of two in the allowed
    /// range, or exceeds the trace length.
    InvalidNumPolynomials(usize),
    /// This error occurs when double commitment is requested without witness blinding.
    UnsupportedPrivacyCombination,
}

impl fmt::Display for ConfigurationError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TraceLengthNotPowerOfTwo(actual) => {
                write!(f, "trace length must be a power of two, but was {actual}")
            },
            Self::TraceLengthTooSmall(min, actual) => {
                write!(f, "trace length must be at least {min}, but was {actual}")
            },
            Self::TraceLengthTooBig(max, actual) => {
                write!(f, "trace length cannot be greater than {max}, but was {actual}")
            },
            Self::TooFewQueries => {
                write!(f, "number of queries must be greater than zero")
            },
            Self::TooManyQueries(max, actual) => {
                write!(f, "number of queries cannot be greater than {max}, but was {actual}")
            },
            Self::InvalidNumPolynomials(actual) => {
                write!(f, "number of polynomials must be a power of two between 2 and 16 and no greater than the trace length, but was {actual}")
            },
            Self::UnsupportedPrivacyCombination => {
                write!(f, "double commitment requires witness blinding to be enabled")
            },
        }
    }
}

impl core::error::Error for ConfigurationError {}
