// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use air::{encoding::hash_statement, transcript, Digest256, HashFn};
use crypto::{ElementHasher, Hasher, MerkleTree, MerkleTreeError};
use math::{FieldElement, StarkField};

use super::*;

// HELPERS
// ================================================================================================

const SEED: [u8; 32] = [7; 32];

fn statement() -> Statement {
    Statement::new("solvency")
        .with_public("exchange", "acme")
        .with_threshold(BaseElement::new(1_000))
}

fn witness() -> Witness {
    Witness::new().with("balance", 5_000).with("account", "acct-17")
}

fn options(privacy: PrivacyOptions) -> ProofOptions {
    ProofOptions::new(8, 64, 4, privacy).unwrap()
}

fn prove(privacy: PrivacyOptions, seed: [u8; 32]) -> Proof {
    Prover::with_seed(options(privacy), seed).prove(&statement(), &witness()).unwrap()
}

fn blinded_values(privacy: PrivacyOptions, seed: [u8; 32]) -> (Vec<BaseElement>, Vec<BaseElement>) {
    let statement_hash = hash_statement(&statement()).unwrap();
    let mut values = build_evaluation_table(&statement_hash, &witness(), 64);
    let mut rng = StdRng::from_seed(seed);
    let factors = if privacy.witness_blinding {
        let factors = table::draw_blinding_factors(&mut rng, 64);
        table::apply_blinding(&mut values, &factors);
        factors
    } else {
        Vec::new()
    };
    (values, factors)
}

// PROOF STRUCTURE
// ================================================================================================

#[test]
fn proof_metadata() {
    let proof = prove(PrivacyOptions::none(), SEED);

    assert_eq!(hash_statement(&statement()).unwrap(), proof.statement_hash);
    assert_eq!(BaseElement::MODULUS_DECIMAL, proof.field_prime);
    assert_eq!("ZK-STARK", proof.protocol);
    assert_eq!(48, proof.security_level);
    assert_eq!(PrivacyOptions::none(), proof.privacy_enhancements);
    assert_eq!(8, proof.query_responses.len());
}

#[test]
fn proof_transcript() {
    for privacy in [PrivacyOptions::none(), PrivacyOptions::all()] {
        let proof = prove(privacy, SEED);

        let challenge = transcript::derive_challenge(&proof.statement_hash, &proof.merkle_root);
        assert_eq!(challenge, proof.challenge);

        let positions = transcript::draw_query_positions(&challenge, 8, 64).unwrap();
        let indexes: Vec<usize> = proof.query_responses.iter().map(|q| q.index).collect();
        assert_eq!(positions, indexes);

        let response =
            transcript::compute_response(proof.statement_hash, challenge, &proof.response_terms());
        assert_eq!(response, proof.response);
    }
}

#[test]
fn proof_opens_blinding_factors_in_double_commitment_mode() {
    let privacy = PrivacyOptions::new(true, false, true, false);
    let proof = prove(privacy, SEED);
    let (_, factors) = blinded_values(privacy, SEED);
    let blinding_root = proof.query_responses[0].proof.last().copied().unwrap();

    for query in proof.query_responses.iter() {
        let blinding = query.blinding.as_ref().unwrap();
        assert_eq!(factors[query.index], blinding.value);
        assert_eq!(6, blinding.proof.len());
        let leaf = HashFn::hash_element(&blinding.value);
        assert!(MerkleTree::<HashFn>::verify(blinding_root, query.index, leaf, &blinding.proof).is_ok());
    }
    assert_eq!(2 * proof.num_queries(), proof.response_terms().len());

    // other modes never open the factors
    let proof = prove(PrivacyOptions::new(true, true, false, false), SEED);
    assert!(proof.query_responses.iter().all(|query| query.blinding.is_none()));
    assert_eq!(proof.query_values(), proof.response_terms());
}

#[test]
fn proof_opens_committed_values() {
    let privacy = PrivacyOptions::new(true, false, false, false);
    let proof = prove(privacy, SEED);
    let (values, _) = blinded_values(privacy, SEED);

    for query in proof.query_responses.iter() {
        assert_eq!(values[query.index], query.value);
        let leaf = HashFn::hash_element(&query.value);
        assert!(MerkleTree::<HashFn>::verify(proof.merkle_root, query.index, leaf, &query.proof).is_ok());
    }
}

#[test]
fn proof_path_lengths() {
    let cases = [
        (PrivacyOptions::none(), 6),
        (PrivacyOptions::new(true, false, false, true), 6),
        (PrivacyOptions::new(false, true, false, false), 4 + 4),
        (PrivacyOptions::new(true, false, true, false), 6 + 1),
        (PrivacyOptions::all(), 4 + 4 + 1),
    ];
    for (privacy, expected) in cases {
        let proof = prove(privacy, SEED);
        for query in proof.query_responses.iter() {
            assert_eq!(expected, query.proof.len());
        }
    }
}

#[test]
fn empty_claim_is_rejected() {
    let mut prover = Prover::with_seed(ProofOptions::default(), SEED);
    let result = prover.prove(&Statement::new(""), &witness());
    assert_eq!(Err(ProverError::Encoding(EncodingError::EmptyClaim)), result);
}

// DETERMINISM
// ================================================================================================

#[test]
fn unblinded_proofs_are_deterministic() {
    let privacy = PrivacyOptions::new(false, true, false, true);
    assert_eq!(prove(privacy, SEED), prove(privacy, [9; 32]));
}

#[test]
fn blinded_proofs_depend_on_seed() {
    let privacy = PrivacyOptions::new(true, false, false, false);
    assert_eq!(prove(privacy, SEED), prove(privacy, SEED));

    let a = prove(privacy, SEED);
    let b = prove(privacy, [9; 32]);
    assert_eq!(a.statement_hash, b.statement_hash);
    assert_ne!(a.merkle_root, b.merkle_root);
}

#[test]
fn repeated_proofs_use_fresh_blinding() {
    let mut prover = Prover::with_seed(options(PrivacyOptions::enhanced()), SEED);
    let first = prover.prove(&statement(), &witness()).unwrap();
    let second = prover.prove(&statement(), &witness()).unwrap();
    assert_ne!(first.merkle_root, second.merkle_root);
}

// EVALUATION TABLE
// ================================================================================================

#[test]
fn evaluation_table_depends_on_witness_and_statement() {
    let statement_hash = hash_statement(&statement()).unwrap();
    let table = build_evaluation_table(&statement_hash, &witness(), 64);
    assert_eq!(64, table.len());
    assert_eq!(table, build_evaluation_table(&statement_hash, &witness(), 64));

    let other_witness = witness().with("balance", 5_001);
    assert_ne!(table, build_evaluation_table(&statement_hash, &other_witness, 64));

    let other_hash = statement_hash + BaseElement::ONE;
    assert_ne!(table, build_evaluation_table(&other_hash, &witness(), 64));

    // a longer table extends a shorter one
    let longer = build_evaluation_table(&statement_hash, &witness(), 128);
    assert_eq!(&table[..], &longer[..64]);
}

#[test]
fn blinding_factors_are_distinct() {
    let mut rng = StdRng::from_seed(SEED);
    let factors = table::draw_blinding_factors(&mut rng, 32);
    for (i, a) in factors.iter().enumerate() {
        assert!(factors[i + 1..].iter().all(|b| a != b));
    }
}

// COMMITMENT
// ================================================================================================

fn leaves(values: &[BaseElement]) -> Vec<Digest256> {
    values.iter().map(HashFn::hash_element).collect()
}

#[test]
fn plain_commitment() {
    let privacy = PrivacyOptions::none();
    let (values, _) = blinded_values(privacy, SEED);
    let commitment = TableCommitment::new(&values, None, &options(privacy)).unwrap();

    let tree = MerkleTree::<HashFn>::new(leaves(&values)).unwrap();
    assert_eq!(tree.root(), commitment.root());
    assert_eq!(commitment.root(), commitment.value_root());
    assert!(commitment.sub_roots().is_empty());
    assert!(commitment.blinding_root().is_none());
    assert_eq!(tree.prove(13).unwrap(), commitment.open(13).unwrap());
    assert_eq!(6, commitment.path_length());
}

#[test]
fn multi_polynomial_commitment() {
    let privacy = PrivacyOptions::new(false, true, false, false);
    let (values, _) = blinded_values(privacy, SEED);
    let commitment = TableCommitment::new(&values, None, &options(privacy)).unwrap();

    let sub_trees: Vec<MerkleTree<HashFn>> = values
        .chunks(16)
        .map(|chunk| MerkleTree::new(leaves(chunk)).unwrap())
        .collect();
    let sub_roots: Vec<Digest256> = sub_trees.iter().map(|tree| *tree.root()).collect();
    assert_eq!(&sub_roots[..], commitment.sub_roots());
    assert_eq!(&HashFn::merge_many(&sub_roots), commitment.root());

    // position 37 is entry 5 of the third sub-table
    let mut expected = sub_trees[2].prove(5).unwrap();
    expected.extend_from_slice(&sub_roots);
    assert_eq!(expected, commitment.open(37).unwrap());
    assert_eq!(8, commitment.path_length());
}

#[test]
fn double_commitment() {
    let privacy = PrivacyOptions::new(true, false, true, false);
    let (values, factors) = blinded_values(privacy, SEED);
    let commitment = TableCommitment::new(&values, Some(&factors), &options(privacy)).unwrap();

    let value_tree = MerkleTree::<HashFn>::new(leaves(&values)).unwrap();
    let blinding_tree = MerkleTree::<HashFn>::new(leaves(&factors)).unwrap();
    assert_eq!(value_tree.root(), commitment.value_root());
    assert_eq!(Some(blinding_tree.root()), commitment.blinding_root());
    assert_eq!(&HashFn::merge(&[*value_tree.root(), *blinding_tree.root()]), commitment.root());

    let path = commitment.open(3).unwrap();
    assert_eq!(blinding_tree.root(), path.last().unwrap());
    assert_eq!(value_tree.prove(3).unwrap(), path[..path.len() - 1]);
    assert_eq!(Some(blinding_tree.prove(3).unwrap()), commitment.open_blinding(3).unwrap());

    let commitment = TableCommitment::new(&values, None, &options(privacy)).unwrap();
    assert_eq!(None, commitment.open_blinding(3).unwrap());
}

#[test]
fn commitment_errors() {
    let options = options(PrivacyOptions::none());
    assert!(matches!(TableCommitment::new(&[], None, &options), Err(MerkleTreeError::NoLeaves)));

    let values = vec![BaseElement::ONE; 64];
    let commitment = TableCommitment::new(&values, None, &options).unwrap();
    assert_eq!(Err(MerkleTreeError::LeafIndexOutOfBounds(64, 64)), commitment.open(64));
}
