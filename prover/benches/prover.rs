// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tundra_prover::{
    build_evaluation_table, math::fields::p521::BaseElement, PrivacyOptions, ProofOptions, Prover,
    Statement, Witness,
};

const SIZES: [usize; 3] = [1024, 4096, 16384];

fn statement() -> Statement {
    Statement::new("solvency")
        .with_public("exchange", "acme")
        .with_threshold(BaseElement::new(1_000_000))
}

fn witness() -> Witness {
    Witness::new().with("balance", 5_000_000).with("account", "acct-17")
}

fn evaluation_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation_table");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    let statement_hash = BaseElement::new(42);
    let witness = witness();
    for &size in SIZES.iter() {
        group.bench_function(BenchmarkId::from_parameter(size), |bench| {
            bench.iter(|| build_evaluation_table(&statement_hash, &witness, size));
        });
    }
    group.finish();
}

fn prove(c: &mut Criterion) {
    let mut group = c.benchmark_group("prove");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    let statement = statement();
    let witness = witness();
    for (name, privacy) in [("plain", PrivacyOptions::none()), ("enhanced", PrivacyOptions::all())] {
        for &size in SIZES.iter() {
            let options = ProofOptions::new(32, size, 4, privacy).unwrap();
            let mut prover = Prover::with_seed(options, [1; 32]);
            group.bench_function(BenchmarkId::new(name, size), |bench| {
                bench.iter(|| prover.prove(&statement, &witness).unwrap());
            });
        }
    }
    group.finish();
}

criterion_group!(prover_group, evaluation_table, prove);
criterion_main!(prover_group);
