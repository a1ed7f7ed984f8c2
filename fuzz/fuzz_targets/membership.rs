#![no_main]

use libfuzzer_sys::fuzz_target;
use merkle_voting::membership::{hash_sorted_pair, verify, NodeHash};
use soroban_sdk::{BytesN, Env, Vec};

// Arbitrary root/leaf/proof triples must never panic, and a proof that
// verifies must recompute to the root along the sorted-pair path.
fuzz_target!(|input: ([u8; 32], [u8; 32], std::vec::Vec<[u8; 32]>)| {
    let (root, leaf, path) = input;
    let env = Env::default();

    let root: NodeHash = BytesN::from_array(&env, &root);
    let leaf: NodeHash = BytesN::from_array(&env, &leaf);
    let mut proof = Vec::new(&env);
    for node in path.iter().take(32) {
        proof.push_back(BytesN::from_array(&env, node));
    }

    let mut computed = leaf.clone();
    for sibling in proof.iter() {
        computed = hash_sorted_pair(&env, &computed, &sibling);
    }
    assert_eq!(verify(&env, &root, &leaf, &proof), computed == root);

    // The path always proves its own recomputed root.
    assert!(verify(&env, &computed, &leaf, &proof));
});
