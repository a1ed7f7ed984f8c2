//! Structured event publishing for the voting contract.

#![allow(deprecated)] // events().publish migration to #[contractevent] tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env};

use crate::phase::Phase;

pub fn publish_initialized(
    env: &Env,
    authority: &Address,
    candidate_count: u32,
    merkle_root: &BytesN<32>,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        (authority.clone(), candidate_count, merkle_root.clone()),
    );
}

pub fn publish_phase_changed(env: &Env, new_phase: Phase) {
    env.events().publish(
        (symbol_short!("PHASE"),),
        (new_phase, env.ledger().timestamp()),
    );
}

pub fn publish_commitment_made(env: &Env, voter: &Address) {
    env.events().publish(
        (symbol_short!("COMMIT"), voter.clone()),
        env.ledger().timestamp(),
    );
}

pub fn publish_vote_revealed(env: &Env, voter: &Address, candidate_index: u32) {
    env.events().publish(
        (symbol_short!("REVEAL"), voter.clone()),
        (candidate_index, env.ledger().timestamp()),
    );
}
