// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use serde_json::Value;
use structopt::StructOpt;
use tundra::{BaseElement, ConfigurationError, PrivacyOptions, ProofOptions, Statement, Witness};

// COMMAND-LINE OPTIONS
// ================================================================================================

#[derive(StructOpt, Debug)]
#[structopt(name = "tundra", about = "Tundra STARK prover and verifier")]
pub enum Command {
    /// Generate a proof for a statement and print it as JSON
    Prove {
        #[structopt(flatten)]
        statement: StatementOptions,

        /// Private witness entry in key=value form; may be repeated
        #[structopt(short = "w", long = "witness", parse(try_from_str = parse_entry))]
        witness: Vec<(String, Value)>,

        #[structopt(flatten)]
        options: ProtocolOptions,

        #[structopt(flatten)]
        privacy: PrivacyFlags,

        /// Print the proof as indented JSON
        #[structopt(long = "pretty")]
        pretty: bool,

        /// Write the proof to a file instead of standard output
        #[structopt(short = "o", long = "output", parse(from_os_str))]
        output: Option<PathBuf>,
    },
    /// Verify a JSON proof against a statement and print a verification report
    Verify {
        /// File containing the JSON proof
        #[structopt(short = "p", long = "proof", parse(from_os_str))]
        proof: PathBuf,

        #[structopt(flatten)]
        statement: StatementOptions,

        #[structopt(flatten)]
        options: ProtocolOptions,
    },
    /// Print the hash of a statement
    Hash {
        #[structopt(flatten)]
        statement: StatementOptions,
    },
}

#[derive(StructOpt, Debug)]
pub struct StatementOptions {
    /// Claim being proven
    #[structopt(short = "c", long = "claim")]
    claim: String,

    /// Public data entry in key=value form; may be repeated
    #[structopt(long = "public", parse(try_from_str = parse_entry))]
    public: Vec<(String, Value)>,

    /// Threshold as a decimal integer smaller than the field modulus
    #[structopt(short = "t", long = "threshold", parse(try_from_str = parse_threshold))]
    threshold: Option<BaseElement>,
}

#[derive(StructOpt, Debug)]
pub struct ProtocolOptions {
    /// Number of queries to include in a proof
    #[structopt(short = "q", long = "queries", default_value = "32")]
    num_queries: usize,

    /// Number of entries in the evaluation table; must be a power of two
    #[structopt(short = "n", long = "trace-length", default_value = "1024")]
    trace_length: usize,

    /// Number of sub-tables used for multi-polynomial commitment
    #[structopt(short = "m", long = "polynomials", default_value = "4")]
    num_polynomials: usize,
}

#[derive(StructOpt, Debug)]
pub struct PrivacyFlags {
    /// Mask the evaluation table with random blinding factors
    #[structopt(long = "blinding")]
    witness_blinding: bool,

    /// Commit to the table as several sub-tables
    #[structopt(long = "multi-polynomial")]
    multi_polynomial: bool,

    /// Commit to the blinding factors as well; requires --blinding
    #[structopt(long = "double-commitment")]
    double_commitment: bool,

    /// Request constant-time verification
    #[structopt(long = "constant-time")]
    constant_time: bool,

    /// Enable all privacy enhancements
    #[structopt(long = "enhanced")]
    enhanced: bool,
}

// CONVERSIONS
// ================================================================================================

impl StatementOptions {
    pub fn to_statement(&self) -> Statement {
        let statement = self
            .public
            .iter()
            .fold(Statement::new(self.claim.as_str()), |statement, (key, value)| {
                statement.with_public(key.as_str(), value.clone())
            });
        match self.threshold {
            Some(threshold) => statement.with_threshold(threshold),
            None => statement,
        }
    }
}

impl ProtocolOptions {
    pub fn to_proof_options(
        &self,
        privacy: PrivacyOptions,
    ) -> Result<ProofOptions, ConfigurationError> {
        ProofOptions::new(self.num_queries, self.trace_length, self.num_polynomials, privacy)
    }
}

impl PrivacyFlags {
    pub fn to_privacy_options(&self) -> PrivacyOptions {
        if self.enhanced {
            return PrivacyOptions::enhanced();
        }
        PrivacyOptions::new(
            self.witness_blinding,
            self.multi_polynomial,
            self.double_commitment,
            self.constant_time,
        )
    }
}

pub fn build_witness(entries: &[(String, Value)]) -> Witness {
    let mut witness = Witness::new();
    for (key, value) in entries {
        witness.insert(key.as_str(), value.clone());
    }
    witness
}

// PARSERS
// ================================================================================================

/// Parses a `key=value` entry. The value is read as JSON when possible, and is kept as a
/// string otherwise.
fn parse_entry(entry: &str) -> Result<(String, Value), String> {
    let (key, value) =
        entry.split_once('=').ok_or_else(|| format!("expected key=value, but was '{entry}'"))?;
    if key.is_empty() {
        return Err(format!("missing key in '{entry}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn parse_threshold(value: &str) -> Result<BaseElement, String> {
    BaseElement::from_decimal(value).map_err(|err| format!("invalid threshold: {err}"))
}

// TESTS
// ================================================================================================
