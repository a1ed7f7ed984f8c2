//! Per-candidate vote counts and winner selection.

use soroban_sdk::{Env, Vec};

use crate::types::DataKey;

// TTL: ~30 days
const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 1_036_800;

fn write(env: &Env, candidate_index: u32, votes: u32) {
    let key = DataKey::Tally(candidate_index);
    env.storage().persistent().set(&key, &votes);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Zero the tally for every index in `0..candidate_count`.
pub(crate) fn init(env: &Env, candidate_count: u32) {
    for index in 0..candidate_count {
        write(env, index, 0);
    }
}

/// Votes recorded for `candidate_index`. Callers bounds-check the index.
pub(crate) fn votes_of(env: &Env, candidate_index: u32) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::Tally(candidate_index))
        .unwrap_or(0)
}

pub(crate) fn increment(env: &Env, candidate_index: u32) -> u32 {
    let next = votes_of(env, candidate_index).saturating_add(1);
    write(env, candidate_index, next);
    next
}

/// The whole table in roster order.
pub(crate) fn all_votes(env: &Env, candidate_count: u32) -> Vec<u32> {
    let mut votes = Vec::new(env);
    for index in 0..candidate_count {
        votes.push_back(votes_of(env, index));
    }
    votes
}

/// Scan `votes` left to right and keep the first strictly greater count.
///
/// Ties therefore go to the lowest index. With no votes at all the result
/// is `(0, 0)`.
pub fn leading_candidate<I>(votes: I) -> (u32, u32)
where
    I: IntoIterator<Item = u32>,
{
    let mut winner = (0u32, 0u32);
    for (index, count) in votes.into_iter().enumerate() {
        if count > winner.1 {
            winner = (index as u32, count);
        }
    }
    winner
}
