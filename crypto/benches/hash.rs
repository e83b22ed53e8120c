// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use math::fields::p521::BaseElement;
use rand_utils::rand_value;
use tundra_crypto::{hashers::Sha3_256, ElementHasher, Hasher};

type Sha3 = Sha3_256<BaseElement>;

fn sha3(c: &mut Criterion) {
    let v: [<Sha3 as Hasher>::Digest; 2] = [Sha3::hash(&[1u8]), Sha3::hash(&[2u8])];
    c.bench_function("hash_sha3 (merge)", |bench| bench.iter(|| Sha3::merge(black_box(&v))));

    c.bench_function("hash_sha3 (element)", |bench| {
        let element: BaseElement = rand_value();
        bench.iter(|| Sha3::hash_element(black_box(&element)))
    });
}

criterion_group!(hash_group, sha3);
criterion_main!(hash_group);
