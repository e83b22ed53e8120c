// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! An implementation of the prime field with modulus $2^{521} - 1$ (the NIST P-521 prime).
//!
//! Elements are stored in canonical form as nine little-endian 64-bit limbs. Products are
//! reduced with the Mersenne identity $2^{521} \equiv 1$, and every reduction finishes with a
//! masked conditional subtraction. No operation branches on the value of its operands.

use core::{
    fmt::{self, Debug, Display, Formatter},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use utils::{ct_select_u64, Randomizable};

use super::{FieldElement, StarkField};
use crate::errors::ElementDecodingError;


// CONSTANTS
// ================================================================================================

const NUM_LIMBS: usize = 9;

// Number of modulus bits held by the most significant limb
const TOP_BITS: u32 = 9;
const TOP_MASK: u64 = (1 << TOP_BITS) - 1;

// Field modulus = 2^521 - 1
const M: [u64; NUM_LIMBS] = [
    u64::MAX,
    u64::MAX,
    u64::MAX,
    u64::MAX,
    u64::MAX,
    u64::MAX,
    u64::MAX,
    u64::MAX,
    TOP_MASK,
];


const MODULUS_DECIMAL: &str = "6864797660130609714981900799081393217269435300143305409394463459185543183397656052122559640661454554977296311391480858037121987999716643812574028291115057151";

// Number of bytes needed to represent field element
const ELEMENT_BYTES: usize = 66;

// The modulus has 157 decimal digits
const MAX_DECIMAL_DIGITS: usize = 157;

// 10^19 is the largest power of ten which fits into a u64
const DECIMAL_CHUNK: u64 = 10_000_000_000_000_000_000;
const DECIMAL_CHUNK_DIGITS: usize = 19;

// FIELD ELEMENT
// ================================================================================================

/// Represents a base field element.
///
/// Internal values are stored in their canonical form in the range [0, M) as nine 64-bit limbs
/// in little-endian order.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub struct BaseElement([u64; NUM_LIMBS]);

impl BaseElement {
    /// Creates a new field element from a u64 value. Every u64 value is smaller than the field
    /// modulus, so no reduction is needed. This function can also be used to initialize
    /// constants.
    pub const fn new(value: u64) -> Self {
        BaseElement([value, 0, 0, 0, 0, 0, 0, 0, 0])
    }

    /// Parses a field element from a string of decimal digits.
    ///
    /// Parsing is strict: the string must consist of ASCII digits only, must not carry a sign,
    /// whitespace, or leading zeros (except for `"0"` itself), and the value must be smaller
    /// than the field modulus.
    pub fn from_decimal(value: &str) -> Result<Self, ElementDecodingError> {
        let digits = value.as_bytes();
        if digits.is_empty() {
            return Err(ElementDecodingError::EmptyString);
        }
        if digits.len() > 1 && digits[0] == b'0' {
            return Err(ElementDecodingError::LeadingZero);
        }
        if let Some(&d) = digits.iter().find(|d| !d.is_ascii_digit()) {
            return Err(ElementDecodingError::InvalidDigit(d as char));
        }
        if digits.len() > MAX_DECIMAL_DIGITS {
            return Err(ElementDecodingError::ValueTooLarge);
        }

        // a 157-digit number is below 2^522, so the accumulator never overflows its top limb
        let mut limbs = [0u64; NUM_LIMBS];
        for &d in digits {
            let mut carry = (d - b'0') as u128;
            for limb in limbs.iter_mut() {
                let v = (*limb as u128) * 10 + carry;
                *limb = v as u64;
                carry = v >> 64;
            }
        }

        if !is_canonical(&limbs) {
            return Err(ElementDecodingError::ValueTooLarge);
        }
        Ok(BaseElement(limbs))
    }

    /// Parses a field element from its canonical 66-byte big-endian encoding.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self, ElementDecodingError> {
        if bytes.len() < ELEMENT_BYTES {
            return Err(ElementDecodingError::NotEnoughBytes(ELEMENT_BYTES, bytes.len()));
        }
        if bytes.len() > ELEMENT_BYTES {
            return Err(ElementDecodingError::TooManyBytes(ELEMENT_BYTES, bytes.len()));
        }

        let mut le_bytes = [0u8; NUM_LIMBS * 8];
        for (target, source) in le_bytes.iter_mut().zip(bytes.iter().rev()) {
            *target = *source;
        }

        let mut limbs = [0u64; NUM_LIMBS];
        for (limb, chunk) in limbs.iter_mut().zip(le_bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *limb = u64::from_le_bytes(buf);
        }

        if !is_canonical(&limbs) {
            return Err(ElementDecodingError::ValueTooLarge);
        }
        Ok(BaseElement(limbs))
    }
}

impl FieldElement for BaseElement {
    type Bytes = [u8; ELEMENT_BYTES];

    const ELEMENT_BYTES: usize = ELEMENT_BYTES;

    const ZERO: Self = BaseElement::new(0);
    const ONE: Self = BaseElement::new(1);

    // ALGEBRA
    // --------------------------------------------------------------------------------------------

    fn exp_limbs(self, power: &[u64]) -> Self {
        let mut r = Self::ONE;
        for limb in power.iter().rev() {
            for bit in (0..64).rev() {
                r = r.square();
                let product = r * self;
                r = select(&r, &product, (limb >> bit) & 1);
            }
        }
        r
    }

    // SERIALIZATION
    // --------------------------------------------------------------------------------------------

    fn to_be_bytes(&self) -> Self::Bytes {
        let mut le_bytes = [0u8; NUM_LIMBS * 8];
        for (chunk, limb) in le_bytes.chunks_exact_mut(8).zip(self.0.iter()) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }

        let mut result = [0u8; ELEMENT_BYTES];
        for (target, source) in result.iter_mut().zip(le_bytes[..ELEMENT_BYTES].iter().rev()) {
            *target = *source;
        }
        result
    }

    fn from_be_bytes_reduce(bytes: &[u8]) -> Self {
        // process the input as a base 2^64 number; a short leading chunk comes first
        let radix = BaseElement([0, 1, 0, 0, 0, 0, 0, 0, 0]);
        let head = bytes.len() % 8;

        let mut result = Self::ZERO;
        if head > 0 {
            let mut buf = [0u8; 8];
            buf[8 - head..].copy_from_slice(&bytes[..head]);
            result = Self::new(u64::from_be_bytes(buf));
        }

        for chunk in bytes[head..].chunks_exact(8) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            result = result * radix + Self::new(u64::from_be_bytes(buf));
        }
        result
    }
}

impl StarkField for BaseElement {
    const MODULUS_DECIMAL: &'static str = MODULUS_DECIMAL;
    const MODULUS_BITS: u32 = 521;

    fn ct_eq(&self, other: &Self) -> bool {
        let diff = self.0.iter().zip(other.0.iter()).fold(0u64, |acc, (a, b)| acc | (a ^ b));
        core::hint::black_box(diff) == 0
    }
}

impl Randomizable for BaseElement {
    const VALUE_SIZE: usize = ELEMENT_BYTES;

    /// Reads an element from the first 66 bytes of `source`, ignoring the top seven bits of the
    /// leading byte. Returns None if the remaining 521 bits encode the modulus itself.
    fn from_random_bytes(source: &[u8]) -> Option<Self> {
        let mut bytes = [0u8; ELEMENT_BYTES];
        bytes.copy_from_slice(source.get(..ELEMENT_BYTES)?);
        bytes[0] &= 1;
        Self::from_be_bytes(&bytes).ok()
    }
}

impl Debug for BaseElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Display for BaseElement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        // split the value into base 10^19 digits, least significant first
        let mut chunks = [0u64; NUM_LIMBS];
        let mut num_chunks = 0;
        let mut value = self.0;
        loop {
            chunks[num_chunks] = div_rem_small(&mut value, DECIMAL_CHUNK);
            num_chunks += 1;
            if value.iter().all(|&limb| limb == 0) {
                break;
            }
        }

        write!(f, "{}", chunks[num_chunks - 1])?;
        for chunk in chunks[..num_chunks - 1].iter().rev() {
            write!(f, "{chunk:0width$}", width = DECIMAL_CHUNK_DIGITS)?;
        }
        Ok(())
    }
}

// OVERLOADED OPERATORS
// ================================================================================================

impl Add for BaseElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(reduce(add_limbs(&self.0, &rhs.0)))
    }
}

impl AddAssign for BaseElement {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl Sub for BaseElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(reduce(add_limbs(&self.0, &neg(&rhs.0))))
    }
}

impl SubAssign for BaseElement {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for BaseElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(mul(&self.0, &rhs.0))
    }
}

impl MulAssign for BaseElement {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs
    }
}

impl Neg for BaseElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self(neg(&self.0))
    }
}

// TYPE CONVERSIONS
// ================================================================================================

impl From<u128> for BaseElement {
    fn from(value: u128) -> Self {
        BaseElement([value as u64, (value >> 64) as u64, 0, 0, 0, 0, 0, 0, 0])
    }
}

impl From<u64> for BaseElement {
    fn from(value: u64) -> Self {
        BaseElement::new(value)
    }
}

impl From<u32> for BaseElement {
    fn from(value: u32) -> Self {
        BaseElement::new(value as u64)
    }
}

impl From<u8> for BaseElement {
    fn from(value: u8) -> Self {
        BaseElement::new(value as u64)
    }
}

// SERDE
// ================================================================================================

/// Field elements are serialized as decimal strings; a JSON number never fits.
#[cfg(feature = "serde")]
impl Serialize for BaseElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for BaseElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DecimalVisitor;

        impl de::Visitor<'_> for DecimalVisitor {
            type Value = BaseElement;

            fn expecting(&self, f: &mut Formatter) -> fmt::Result {
                f.write_str("a decimal string holding an integer smaller than the field modulus")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<BaseElement, E> {
                BaseElement::from_decimal(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(DecimalVisitor)
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Returns true if the limbs encode a value in [0, M).
fn is_canonical(limbs: &[u64; NUM_LIMBS]) -> bool {
    limbs[NUM_LIMBS - 1] >> TOP_BITS == 0 && *limbs != M
}

/// Adds two values; both must be below 2^521, so the sum fits into 522 bits.
#[inline(always)]
fn add_limbs(a: &[u64; NUM_LIMBS], b: &[u64; NUM_LIMBS]) -> [u64; NUM_LIMBS] {
    let mut result = [0u64; NUM_LIMBS];
    let mut carry = 0u64;
    for i in 0..NUM_LIMBS {
        let (s1, c1) = a[i].overflowing_add(b[i]);
        let (s2, c2) = s1.overflowing_add(carry);
        result[i] = s2;
        carry = (c1 | c2) as u64;
    }
    result
}

/// Reduces a value below 2^522 into [0, M).
#[inline(always)]
fn reduce(x: [u64; NUM_LIMBS]) -> [u64; NUM_LIMBS] {
    // x = lo + 2^521 * hi where hi is 0 or 1, and 2^521 = 1 (mod M)
    let mut carry = x[NUM_LIMBS - 1] >> TOP_BITS;
    let mut result = x;
    result[NUM_LIMBS - 1] &= TOP_MASK;
    for limb in result.iter_mut() {
        let (s, c) = limb.overflowing_add(carry);
        *limb = s;
        carry = c as u64;
    }
    sub_modulus_if_ge(result)
}

/// Subtracts M from a value below 2M if the value is at least M.
#[inline(always)]
fn sub_modulus_if_ge(x: [u64; NUM_LIMBS]) -> [u64; NUM_LIMBS] {
    let mut diff = [0u64; NUM_LIMBS];
    let mut borrow = 0u64;
    for i in 0..NUM_LIMBS {
        let (d1, b1) = x[i].overflowing_sub(M[i]);
        let (d2, b2) = d1.overflowing_sub(borrow);
        diff[i] = d2;
        borrow = (b1 | b2) as u64;
    }

    // a final borrow means x < M
    let mut result = [0u64; NUM_LIMBS];
    for i in 0..NUM_LIMBS {
        result[i] = ct_select_u64(diff[i], x[i], borrow);
    }
    result
}

/// Computes M - a for a in [0, M), mapping zero to zero.
#[inline(always)]
fn neg(a: &[u64; NUM_LIMBS]) -> [u64; NUM_LIMBS] {
    // M has all 521 low bits set, so M - a is the bitwise complement of a in those bits
    let mut result = [0u64; NUM_LIMBS];
    for (r, limb) in result.iter_mut().zip(a.iter()) {
        *r = !limb;
    }
    result[NUM_LIMBS - 1] &= TOP_MASK;
    sub_modulus_if_ge(result)
}

/// Multiplies two reduced values and reduces the 1042-bit product.
#[inline(always)]
fn mul(a: &[u64; NUM_LIMBS], b: &[u64; NUM_LIMBS]) -> [u64; NUM_LIMBS] {
    let mut t = [0u64; 2 * NUM_LIMBS];
    for i in 0..NUM_LIMBS {
        let mut carry = 0u128;
        for j in 0..NUM_LIMBS {
            let v = t[i + j] as u128 + (a[i] as u128) * (b[j] as u128) + carry;
            t[i + j] = v as u64;
            carry = v >> 64;
        }
        t[i + NUM_LIMBS] = carry as u64;
    }

    // t = lo + 2^521 * hi with both lo and hi below 2^521
    let mut lo = [0u64; NUM_LIMBS];
    lo.copy_from_slice(&t[..NUM_LIMBS]);
    lo[NUM_LIMBS - 1] &= TOP_MASK;

    let mut hi = [0u64; NUM_LIMBS];
    for i in 0..NUM_LIMBS {
        hi[i] = (t[i + NUM_LIMBS - 1] >> TOP_BITS) | (t[i + NUM_LIMBS] << (64 - TOP_BITS));
    }

    reduce(add_limbs(&lo, &hi))
}

/// Returns `a` when `choice` is 0 and `b` when `choice` is 1.
#[inline(always)]
fn select(a: &BaseElement, b: &BaseElement, choice: u64) -> BaseElement {
    let mut result = [0u64; NUM_LIMBS];
    for i in 0..NUM_LIMBS {
        result[i] = ct_select_u64(a.0[i], b.0[i], choice);
    }
    BaseElement(result)
}

/// Divides `value` in place by a small divisor and returns the remainder.
fn div_rem_small(value: &mut [u64; NUM_LIMBS], divisor: u64) -> u64 {
    let divisor = divisor as u128;
    let mut rem = 0u128;
    for limb in value.iter_mut().rev() {
        let current = (rem << 64) | (*limb as u128);
        *limb = (current / divisor) as u64;
        rem = current % divisor;
    }
    rem as u64
}
