// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rand_utils::{rand_value, rand_vector};
use tundra_math::{fields::p521::BaseElement, FieldElement};

pub fn p521_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("p521");

    group.bench_function("add", |bench| {
        let x: BaseElement = rand_value();
        let y: BaseElement = rand_value();
        bench.iter(|| black_box(x) + black_box(y))
    });

    group.bench_function("sub", |bench| {
        let x: BaseElement = rand_value();
        let y: BaseElement = rand_value();
        bench.iter(|| black_box(x) - black_box(y))
    });

    group.bench_function("mul", |bench| {
        let x: BaseElement = rand_value();
        let y: BaseElement = rand_value();
        bench.iter(|| black_box(x) * black_box(y))
    });

    group.bench_function("exp", |bench| {
        let x: BaseElement = rand_value();
        let y: u64 = rand_value();
        bench.iter(|| black_box(x).exp(black_box(y)))
    });

    group.bench_function("from_be_bytes_reduce", |bench| {
        let bytes: Vec<u8> = rand_vector(64);
        bench.iter(|| BaseElement::from_be_bytes_reduce(black_box(&bytes)))
    });

    group.bench_function("to_string", |bench| {
        let x: BaseElement = rand_value();
        bench.iter(|| black_box(x).to_string())
    });
}

criterion_group!(field_group, p521_ops);
criterion_main!(field_group);
