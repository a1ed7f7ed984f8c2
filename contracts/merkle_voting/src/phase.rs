//! Protocol phase.
//!
//! The authority may move to any phase from any phase; there is no
//! transition table. Skipping ahead and rewinding are both allowed.

use soroban_sdk::{contracttype, Env};

use crate::types::DataKey;

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Phase {
    Init = 0,
    Commit = 1,
    Reveal = 2,
    End = 3,
}

/// Current phase. An uninitialized contract reads as `Init`.
pub fn current(env: &Env) -> Phase {
    env.storage()
        .instance()
        .get(&DataKey::Phase)
        .unwrap_or(Phase::Init)
}

pub(crate) fn set(env: &Env, phase: Phase) {
    env.storage().instance().set(&DataKey::Phase, &phase);
}

pub fn is(env: &Env, expected: Phase) -> bool {
    current(env) == expected
}
