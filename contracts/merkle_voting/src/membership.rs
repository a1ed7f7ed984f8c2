//! Sorted-pair Merkle membership proofs over the voter whitelist.
//!
//! Leaves are `keccak256(lowercase(strkey(address)))`. Interior nodes hash
//! the two children smallest-first, so a proof is just the list of sibling
//! hashes from leaf to root with no left/right flags.

use soroban_sdk::{Address, Bytes, BytesN, Env, Vec};

pub type NodeHash = BytesN<32>;

/// Longest strkey an `Address` can render to (muxed account form).
const MAX_STRKEY_LEN: usize = 69;

/// Hash two nodes in ascending byte order.
///
/// Byte-lexicographic order on 32-byte values is the same as numeric order
/// on their big-endian integer reading.
pub fn hash_sorted_pair(env: &Env, a: &NodeHash, b: &NodeHash) -> NodeHash {
    let a = a.to_array();
    let b = b.to_array();
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    let mut combined = Bytes::new(env);
    combined.extend_from_array(&lo);
    combined.extend_from_array(&hi);
    env.crypto().keccak256(&combined).into()
}

/// Canonical byte form of a voter identity: its strkey, ASCII lower-cased.
///
/// Returns `None` for an address whose rendering does not fit the buffer,
/// which no valid strkey does.
pub fn canonical_address(env: &Env, voter: &Address) -> Option<Bytes> {
    let rendered = voter.to_string();
    let len = rendered.len() as usize;
    if len > MAX_STRKEY_LEN {
        return None;
    }

    let mut buf = [0u8; MAX_STRKEY_LEN];
    let slice = &mut buf[..len];
    rendered.copy_into_slice(slice);
    slice.make_ascii_lowercase();
    Some(Bytes::from_slice(env, slice))
}

/// Whitelist leaf for `voter`.
pub fn voter_leaf(env: &Env, voter: &Address) -> Option<NodeHash> {
    canonical_address(env, voter).map(|bytes| env.crypto().keccak256(&bytes).into())
}

/// Recompute the root from `leaf` and `proof` and compare it with `root`.
///
/// An empty proof only verifies a single-member tree, where the leaf is the
/// root.
pub fn verify(env: &Env, root: &NodeHash, leaf: &NodeHash, proof: &Vec<NodeHash>) -> bool {
    let mut current = leaf.clone();
    for sibling in proof.iter() {
        current = hash_sorted_pair(env, &current, &sibling);
    }
    &current == root
}

/// Whether `voter` is proven a member of the tree under `root`.
pub fn is_member(env: &Env, root: &NodeHash, voter: &Address, proof: &Vec<NodeHash>) -> bool {
    match voter_leaf(env, voter) {
        Some(leaf) => verify(env, root, &leaf, proof),
        None => false,
    }
}
