// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use std::{fmt, fs, io, path::Path, process::ExitCode, time::Instant};

use serde_json::json;
use structopt::StructOpt;
use tracing::{debug, info_span};
use tracing_subscriber::EnvFilter;
use tundra::{
    encoding::hash_statement, ConfigurationError, DecodeError, EncodingError, Proof,
    PrivacyOptions, Prover, ProverError, Verifier,
};

mod options;
use options::{build_witness, Command};

// CLI RUNNER
// ================================================================================================

fn main() -> ExitCode {
    // configure logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // read command-line args
    let command = Command::from_args();

    match run(command) {
        Ok(exit_code) => exit_code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        },
    }
}

fn run(command: Command) -> Result<ExitCode, CliError> {
    match command {
        Command::Prove {
            statement,
            witness,
            options,
            privacy,
            pretty,
            output,
        } => {
            let statement = statement.to_statement();
            let witness = build_witness(&witness);
            let options = options.to_proof_options(privacy.to_privacy_options())?;

            let now = Instant::now();
            let proof = info_span!("generate_proof")
                .in_scope(|| Prover::new(options).prove(&statement, &witness))?;
            debug!("proof generated in {} ms", now.elapsed().as_millis());

            let json = if pretty { proof.to_json_pretty() } else { proof.to_json() };
            match output {
                Some(path) => write_file(&path, &json)?,
                None => println!("{json}"),
            }
            Ok(ExitCode::SUCCESS)
        },
        Command::Verify { proof, statement, options } => {
            let statement = statement.to_statement();
            let proof = Proof::from_json(&read_file(&proof)?)?;

            // privacy flags are read from the proof
            let options = options.to_proof_options(PrivacyOptions::none())?;
            let report = Verifier::new(options).verify_with_report(&proof, &statement);

            let summary = json!({
                "valid": report.valid,
                "duration_ms": report.duration_ms,
                "message": report.message,
            });
            println!("{summary}");
            Ok(if report.valid { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        },
        Command::Hash { statement } => {
            println!("{}", hash_statement(&statement.to_statement())?);
            Ok(ExitCode::SUCCESS)
        },
    }
}

// FILE ACCESS
// ================================================================================================

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|err| CliError::Io(path.display().to_string(), err))
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    fs::write(path, contents).map_err(|err| CliError::Io(path.display().to_string(), err))
}

// CLI ERROR
// ================================================================================================

#[derive(Debug)]
enum CliError {
    Io(String, io::Error),
    Configuration(ConfigurationError),
    Encoding(EncodingError),
    Decode(DecodeError),
    Prover(ProverError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(path, err) => write!(f, "could not access '{path}': {err}"),
            Self::Configuration(err) => write!(f, "invalid proof options: {err}"),
            Self::Encoding(err) => write!(f, "invalid statement: {err}"),
            Self::Decode(err) => write!(f, "invalid proof: {err}"),
            Self::Prover(err) => write!(f, "proof generation failed: {err}"),
        }
    }
}

impl From<ConfigurationError> for CliError {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

impl From<EncodingError> for CliError {
    fn from(err: EncodingError) -> Self {
        Self::Encoding(err)
    }
}

impl From<DecodeError> for CliError {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

impl From<ProverError> for CliError {
    fn from(err: ProverError) -> Self {
        Self::Prover(err)
    }
}
