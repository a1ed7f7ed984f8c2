//! Per-voter commitment records and participation counters.

use soroban_sdk::{contracttype, Address, Bytes, BytesN, Env};

use crate::types::DataKey;

// TTL: ~30 days
const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 1_036_800;

/// Stored once per voter on their first successful commit. Never removed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommitmentRecord {
    /// keccak256( be256(candidate_index) || secret )
    pub commitment: BytesN<32>,
    pub committed: bool,
    pub revealed: bool,
}

/// Compute the commitment a voter submits for `candidate_index`.
///
/// The index is widened to a 32-byte big-endian word before the secret is
/// appended, so the index/secret boundary is fixed and no two distinct
/// `(index, secret)` pairs share a pre-image.
pub fn commitment_hash(env: &Env, candidate_index: u32, secret: &Bytes) -> BytesN<32> {
    let mut word = [0u8; 32];
    word[28..].copy_from_slice(&candidate_index.to_be_bytes());

    let mut data = Bytes::from_array(env, &word);
    data.append(secret);
    env.crypto().keccak256(&data).into()
}

fn commit_key(voter: &Address) -> DataKey {
    DataKey::Commitment(voter.clone())
}

pub(crate) fn load(env: &Env, voter: &Address) -> Option<CommitmentRecord> {
    env.storage().persistent().get(&commit_key(voter))
}

pub(crate) fn store(env: &Env, voter: &Address, record: &CommitmentRecord) {
    let key = commit_key(voter);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn has_committed(env: &Env, voter: &Address) -> bool {
    env.storage().persistent().has(&commit_key(voter))
}

pub(crate) fn has_revealed(env: &Env, voter: &Address) -> bool {
    load(env, voter).map(|r| r.revealed).unwrap_or(false)
}

// ── Counters ─────────────────────────────────────────────────────────────────

fn read_counter(env: &Env, key: &DataKey) -> u32 {
    env.storage().instance().get(key).unwrap_or(0)
}

fn bump_counter(env: &Env, key: &DataKey) -> u32 {
    let next = read_counter(env, key).saturating_add(1);
    env.storage().instance().set(key, &next);
    next
}

pub(crate) fn commitments_submitted(env: &Env) -> u32 {
    read_counter(env, &DataKey::CommitCount)
}

pub(crate) fn votes_revealed(env: &Env) -> u32 {
    read_counter(env, &DataKey::RevealCount)
}

/// Record a fresh commitment for `voter` and bump the commit counter.
///
/// Callers must already have checked that `voter` has no record.
pub(crate) fn record_commit(env: &Env, voter: &Address, commitment: BytesN<32>) {
    let record = CommitmentRecord {
        commitment,
        committed: true,
        revealed: false,
    };
    store(env, voter, &record);
    bump_counter(env, &DataKey::CommitCount);
}

/// Flip `revealed` on an existing record and bump the reveal counter.
pub(crate) fn mark_revealed(env: &Env, voter: &Address, mut record: CommitmentRecord) {
    record.revealed = true;
    store(env, voter, &record);
    bump_counter(env, &DataKey::RevealCount);
}
