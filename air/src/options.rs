// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

// PRIVACY OPTIONS
// ================================================================================================

/// Privacy enhancements applied to a proof.
///
/// The four flags are independent with one exception: double commitment commits to the
/// blinding factors, so it can only be enabled together with witness blinding.
///
/// 1. Witness blinding - every table value is masked with a fresh uniformly random field
///    element before being committed, so opened values reveal nothing about the table.
/// 2. Multi-polynomial - the table is split into several sub-tables, each with its own Merkle
///    tree; the committed root is the hash of all sub-roots.
/// 3. Double commitment - a second Merkle tree is built over the blinding factors, and the
///    committed root is the hash of the value root and the blinding root.
/// 4. Constant time - digest comparisons in the verifier run in constant time and all queries
///    are checked before a result is reported. Field arithmetic is constant-time regardless of
///    this flag.
///
/// On the wire the flags form the `privacy_enhancements` object of a proof and are encoded as
/// JSON booleans.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PrivacyOptions {
    pub witness_blinding: bool,
    pub multi_polynomial: bool,
    pub double_commitment: bool,
    pub constant_time: bool,
}

impl PrivacyOptions {
    /// Returns privacy options with the specified flags.
    pub const fn new(
        witness_blinding: bool,
        multi_polynomial: bool,
        double_commitment: bool,
        constant_time: bool,
    ) -> Self {
        PrivacyOptions {
            witness_blinding,
            multi_polynomial,
            double_commitment,
            constant_time,
        }
    }

    /// Returns privacy options with all four flags enabled.
    pub const fn all() -> Self {
        Self::new(true, true, true, true)
    }

    /// Returns the options used in enhanced-privacy mode; all four flags are enabled.
    pub const fn enhanced() -> Self {
        Self::all()
    }

    /// Returns privacy options with all flags disabled.
    pub const fn none() -> Self {
        Self::new(false, false, false, false)
    }

    /// Checks that this combination of flags is supported.
    ///
    /// # Errors
    /// Returns an error if double commitment is enabled without witness blinding.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.double_commitment && !self.witness_blinding {
            return Err(ConfigurationError::UnsupportedPrivacyCombination);
        }
        Ok(())
    }
}

// PROOF OPTIONS
// ================================================================================================

/// Protocol parameters shared by the prover and the verifier.
///
/// These parameters have a direct impact on proof soundness, proof generation time, and proof
/// size. Specifically:
///
/// 1. Trace length - the number of entries in the evaluation table. Every query is drawn from
///    this domain, so each query adds `log2(trace_length)` bits of security.
/// 2. Number of queries - higher values increase proof soundness, but also increase proof size.
///    Security level of a proof is `min(128, num_queries * log2(trace_length))`.
/// 3. Number of polynomials - the number of sub-tables the table is split into when
///    multi-polynomial commitment is enabled. It has no effect otherwise.
///
/// Another important parameter is the hash function used in the protocol. All commitments and
/// challenges use SHA3-256, which bounds soundness at 128 bits.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProofOptions {
    num_queries: u8,
    trace_length: usize,
    num_polynomials: u8,
    privacy: PrivacyOptions,
}

// PROOF OPTIONS IMPLEMENTATION
// ================================================================================================
impl ProofOptions {
    // CONSTANTS
    // --------------------------------------------------------------------------------------------

    /// Smallest allowed trace length.
    pub const MIN_TRACE_LENGTH: usize = 8;

    /// Largest allowed trace length.
    pub const MAX_TRACE_LENGTH: usize = 1 << 20;

    /// Largest allowed number of queries.
    pub const MAX_NUM_QUERIES: usize = 128;

    /// Largest allowed number of polynomials.
    pub const MAX_NUM_POLYNOMIALS: usize = 16;

    /// Upper bound on the reported security level, in bits.
    pub const MAX_SECURITY_LEVEL: u32 = 128;

    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------
    /// Returns a new instance of [ProofOptions] struct constructed from the specified parameters.
    ///
    /// # Errors
    /// Returns an error if:
    /// * `trace_length` is not a power of two, is smaller than 8, or is greater than 2^20.
    /// * `num_queries` is zero, greater than 128, or greater than half of `trace_length`.
    /// * `num_polynomials` is not a power of two, is smaller than 2, greater than 16, or greater
    ///   than `trace_length`.
    /// * `privacy` enables double commitment without witness blinding.
    pub fn new(
        num_queries: usize,
        trace_length: usize,
        num_polynomials: usize,
        privacy: PrivacyOptions,
    ) -> Result<ProofOptions, ConfigurationError> {
        if !trace_length.is_power_of_two() {
            return Err(ConfigurationError::TraceLengthNotPowerOfTwo(trace_length));
        }
        if trace_length < Self::MIN_TRACE_LENGTH {
            return Err(ConfigurationError::TraceLengthTooSmall(
                Self::MIN_TRACE_LENGTH,
                trace_length,
            ));
        }
        if trace_length > Self::MAX_TRACE_LENGTH {
            return Err(ConfigurationError::TraceLengthTooBig(Self::MAX_TRACE_LENGTH, trace_length));
        }

        if num_queries == 0 {
            return Err(ConfigurationError::TooFewQueries);
        }
        // at most half of the domain can be queried
        let max_queries = Self::MAX_NUM_QUERIES.min(trace_length / 2);
        if num_queries > max_queries {
            return Err(ConfigurationError::TooManyQueries(max_queries, num_queries));
        }

        if !num_polynomials.is_power_of_two()
            || num_polynomials < 2
            || num_polynomials > Self::MAX_NUM_POLYNOMIALS
            || num_polynomials > trace_length
        {
            return Err(ConfigurationError::InvalidNumPolynomials(num_polynomials));
        }

        privacy.validate()?;

        Ok(ProofOptions {
            num_queries: num_queries as u8,
            trace_length,
            num_polynomials: num_polynomials as u8,
            privacy,
        })
    }

    /// Returns a copy of these options with the specified privacy flags.
    ///
    /// # Errors
    /// Returns an error if the flag combination is not supported.
    pub fn with_privacy(mut self, privacy: PrivacyOptions) -> Result<Self, ConfigurationError> {
        privacy.validate()?;
        self.privacy = privacy;
        Ok(self)
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns number of queries for a proof.
    ///
    /// Each query opens one table position, so each additional query increases proof size by
    /// one value and one Merkle path.
    pub fn num_queries(&self) -> usize {
        self.num_queries as usize
    }

    /// Returns the number of entries in the evaluation table.
    pub fn trace_length(&self) -> usize {
        self.trace_length
    }

    /// Returns the number of sub-tables used by multi-polynomial commitment.
    pub fn num_polynomials(&self) -> usize {
        self.num_polynomials as usize
    }

    /// Returns the privacy enhancements to be applied to proofs.
    pub fn privacy(&self) -> PrivacyOptions {
        self.privacy
    }

    /// Returns the security level of proofs generated with these options, in bits.
    pub fn security_level(&self) -> u32 {
        let bits = self.num_queries as u32 * self.trace_length.ilog2();
        bits.min(Self::MAX_SECURITY_LEVEL)
    }
}

impl Default for ProofOptions {
    /// 32 queries over a table of 1024 entries split into 4 polynomials, with all privacy
    /// enhancements disabled.
    fn default() -> Self {
        ProofOptions {
            num_queries: 32,
            trace_length: 1024,
            num_polynomials: 4,
            privacy: PrivacyOptions::none(),
        }
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = ProofOptions::default();
        assert_eq!(32, options.num_queries());
        assert_eq!(1024, options.trace_length());
        assert_eq!(4, options.num_polynomials());
        assert_eq!(PrivacyOptions::default(), options.privacy());
        assert_eq!(128, options.security_level());
        assert_eq!(Ok(options), ProofOptions::new(32, 1024, 4, PrivacyOptions::none()));
    }

    #[test]
    fn security_level() {
        let options = ProofOptions::new(4, 16, 2, PrivacyOptions::none()).unwrap();
        assert_eq!(16, options.security_level());
        let options = ProofOptions::new(8, 1024, 2, PrivacyOptions::none()).unwrap();
        assert_eq!(80, options.security_level());
        let options = ProofOptions::new(100, 1 << 20, 16, PrivacyOptions::all()).unwrap();
        assert_eq!(128, options.security_level());
    }

    #[test]
    fn invalid_trace_length() {
        let none = PrivacyOptions::none();
        assert_eq!(
            Err(ConfigurationError::TraceLengthNotPowerOfTwo(1000)),
            ProofOptions::new(32, 1000, 4, none)
        );
        assert_eq!(
            Err(ConfigurationError::TraceLengthTooSmall(8, 4)),
            ProofOptions::new(1, 4, 2, none)
        );
        assert_eq!(
            Err(ConfigurationError::TraceLengthTooBig(1 << 20, 1 << 21)),
            ProofOptions::new(32, 1 << 21, 4, none)
        );
    }

    #[test]
    fn invalid_num_queries() {
        let none = PrivacyOptions::none();
        assert_eq!(Err(ConfigurationError::TooFewQueries), ProofOptions::new(0, 1024, 4, none));
        assert_eq!(
            Err(ConfigurationError::TooManyQueries(128, 129)),
            ProofOptions::new(129, 1024, 4, none)
        );
        assert_eq!(
            Err(ConfigurationError::TooManyQueries(8, 9)),
            ProofOptions::new(9, 16, 4, none)
        );
        assert!(ProofOptions::new(8, 16, 4, none).is_ok());
    }

    #[test]
    fn invalid_num_polynomials() {
        let none = PrivacyOptions::none();
        for m in [0, 1, 3, 6, 32] {
            assert_eq!(
                Err(ConfigurationError::InvalidNumPolynomials(m)),
                ProofOptions::new(4, 1024, m, none)
            );
        }
        assert!(ProofOptions::new(4, 8, 8, none).is_ok());
        assert_eq!(
            Err(ConfigurationError::InvalidNumPolynomials(16)),
            ProofOptions::new(4, 8, 16, none)
        );
    }

    #[test]
    fn privacy_combinations() {
        let double_only = PrivacyOptions::new(false, false, true, false);
        assert_eq!(
            Err(ConfigurationError::UnsupportedPrivacyCombination),
            ProofOptions::new(32, 1024, 4, double_only)
        );
        assert_eq!(
            Err(ConfigurationError::UnsupportedPrivacyCombination),
            ProofOptions::default().with_privacy(double_only)
        );

        let options = ProofOptions::default().with_privacy(PrivacyOptions::enhanced()).unwrap();
        assert_eq!(PrivacyOptions::all(), options.privacy());
    }
}
