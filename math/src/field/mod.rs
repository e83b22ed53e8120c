// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

mod traits;
pub use traits::{FieldElement, StarkField};

pub mod p521;
