// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::fmt;

// ELEMENT DECODING ERROR
// ================================================================================================

/// Defines errors which can occur when a field element is read from bytes or from a decimal
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementDecodingError {
    /// This error occurs when a byte encoding is shorter than a field element.
    NotEnoughBytes(usize, usize),
    /// This error occurs when a byte encoding is longer than a field element.
    TooManyBytes(usize, usize),
    /// This error occurs when a decimal string is empty.
    EmptyString,
    /// This error occurs when a decimal string contains a character other than an ASCII digit.
    /// Signs and whitespace are rejected this way as well.
    InvalidDigit(char),
    /// This error occurs when a decimal string other than "0" starts with a zero.
    LeadingZero,
    /// This error occurs when the decoded value is greater than or equal to the field modulus.
    ValueTooLarge,
}

impl fmt::Display for ElementDecodingError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEnoughBytes(expected, actual) => {
                write!(f, "not enough bytes for a full field element; expected {expected} bytes, but was {actual} bytes")
            },
            Self::TooManyBytes(expected, actual) => {
                write!(f, "too many bytes for a field element; expected {expected} bytes, but was {actual} bytes")
            },
            Self::EmptyString => {
                write!(f, "field element string is empty")
            },
            Self::InvalidDigit(c) => {
                write!(f, "field element string contains invalid character {c:?}")
            },
            Self::LeadingZero => {
                write!(f, "field element string has a leading zero")
            },
            Self::ValueTooLarge => {
                write!(f, "invalid field element: value is greater than or equal to the field modulus")
            },
        }
    }
}

impl core::error::Error for ElementDecodingError {}
