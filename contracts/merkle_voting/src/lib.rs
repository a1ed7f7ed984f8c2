#![no_std]

//! # Merkle Voting
//!
//! A commit-reveal ballot over a fixed candidate roster, open only to voters
//! who can prove membership of an off-chain whitelist:
//!
//! - **Whitelist**: only the sorted-pair Merkle root is stored; each voter
//!   brings their own proof when committing.
//! - **Commit-reveal**: voters first submit `keccak256(be256(index) || secret)`,
//!   then disclose `index` and `secret` once the authority opens the reveal.
//! - **Phases**: Init → Commit → Reveal → End, set by a single authority.
//!   Any phase may be set at any time.
//! - **Tally**: counts move only on successful reveals; the winner is the
//!   lowest index holding the maximum count.

pub mod errors;
pub mod events;
pub mod ledger;
pub mod membership;
pub mod phase;
pub mod tally;
pub mod types;

use soroban_sdk::{contract, contractimpl, log, Address, Bytes, BytesN, Env, String, Vec};

pub use errors::VotingError;
pub use ledger::CommitmentRecord;
pub use phase::Phase;
pub use types::{Candidate, CandidateResult, DataKey, VotingStats};

// Instance storage TTL: ~30 days
const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
const INSTANCE_TTL_EXTEND_TO: u32 = 1_036_800;

#[contract]
pub struct MerkleVotingContract;

#[contractimpl]
impl MerkleVotingContract {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Fix the roster, whitelist and authority for the lifetime of the ballot.
    ///
    /// Until this runs, any signer may claim the authority role, so deployers
    /// must submit the deploy and `initialize` in the same transaction. The
    /// named `authority` must sign.
    ///
    /// * `candidate_names`: roster in index order; must be non-empty.
    /// * `merkle_root`: sorted-pair root over the whitelisted leaves.
    /// * `whitelisted_voters`: size of the off-chain list the root was built
    ///   from; the root itself does not reveal it.
    pub fn initialize(
        env: Env,
        authority: Address,
        candidate_names: Vec<String>,
        merkle_root: BytesN<32>,
        whitelisted_voters: u32,
    ) -> Result<(), VotingError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(VotingError::AlreadyInitialized);
        }
        authority.require_auth();

        if candidate_names.is_empty() {
            return Err(VotingError::EmptyRoster);
        }
        let candidate_count = candidate_names.len();

        env.storage().instance().set(&DataKey::Admin, &authority);
        env.storage()
            .instance()
            .set(&DataKey::Candidates, &candidate_names);
        env.storage()
            .instance()
            .set(&DataKey::MerkleRoot, &merkle_root);
        env.storage()
            .instance()
            .set(&DataKey::WhitelistedVoters, &whitelisted_voters);
        env.storage().instance().set(&DataKey::CommitCount, &0u32);
        env.storage().instance().set(&DataKey::RevealCount, &0u32);
        phase::set(&env, Phase::Init);
        tally::init(&env, candidate_count);
        Self::extend_instance_ttl(&env);

        events::publish_initialized(&env, &authority, candidate_count, &merkle_root);

        Ok(())
    }

    // ── Phase control ─────────────────────────────────────────────────────────

    /// Move the ballot to `new_phase`. Authority only.
    ///
    /// No adjacency check is made: the authority may skip phases or go back.
    pub fn set_phase(env: Env, caller: Address, new_phase: Phase) -> Result<(), VotingError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        phase::set(&env, new_phase);
        Self::extend_instance_ttl(&env);
        log!(&env, "phase changed", new_phase);
        events::publish_phase_changed(&env, new_phase);

        Ok(())
    }

    // ── Commit-reveal voting ──────────────────────────────────────────────────

    /// Phase 1: submit a blinded vote.
    ///
    /// `commitment` is `keccak256(be256(candidate_index) || secret)`, see
    /// `compute_commitment`. `proof` is the voter's sibling path in the
    /// whitelist tree.
    pub fn commit_vote(
        env: Env,
        voter: Address,
        commitment: BytesN<32>,
        proof: Vec<BytesN<32>>,
    ) -> Result<(), VotingError> {
        Self::require_initialized(&env)?;
        voter.require_auth();

        if !phase::is(&env, Phase::Commit) {
            return Err(VotingError::WrongPhase);
        }

        let root = Self::load_root(&env)?;
        if !membership::is_member(&env, &root, &voter, &proof) {
            log!(&env, "membership proof rejected", voter);
            return Err(VotingError::NotWhitelisted);
        }

        if ledger::has_committed(&env, &voter) {
            return Err(VotingError::AlreadyCommitted);
        }

        ledger::record_commit(&env, &voter, commitment);
        Self::extend_instance_ttl(&env);
        events::publish_commitment_made(&env, &voter);

        Ok(())
    }

    /// Phase 2: open a committed vote and count it.
    ///
    /// The stored commitment must equal `compute_commitment(candidate_index,
    /// secret)`. The roster bound is checked after the hash, so a commitment
    /// to an out-of-range index can never be counted.
    pub fn reveal_vote(
        env: Env,
        voter: Address,
        candidate_index: u32,
        secret: Bytes,
    ) -> Result<(), VotingError> {
        Self::require_initialized(&env)?;
        voter.require_auth();

        if !phase::is(&env, Phase::Reveal) {
            return Err(VotingError::WrongPhase);
        }

        let record = match ledger::load(&env, &voter) {
            Some(r) if r.committed && !r.revealed => r,
            _ => return Err(VotingError::NoCommitmentOrAlreadyRevealed),
        };

        if ledger::commitment_hash(&env, candidate_index, &secret) != record.commitment {
            return Err(VotingError::CommitmentMismatch);
        }

        Self::require_candidate(&env, candidate_index)?;

        ledger::mark_revealed(&env, &voter, record);
        tally::increment(&env, candidate_index);
        Self::extend_instance_ttl(&env);
        events::publish_vote_revealed(&env, &voter, candidate_index);

        Ok(())
    }

    // ── Roster views ──────────────────────────────────────────────────────────

    pub fn get_total_candidates(env: Env) -> Result<u32, VotingError> {
        Ok(Self::load_candidates(&env)?.len())
    }

    pub fn get_all_candidates(env: Env) -> Result<Vec<String>, VotingError> {
        Self::load_candidates(&env)
    }

    pub fn get_candidate(env: Env, index: u32) -> Result<String, VotingError> {
        Self::load_candidates(&env)?
            .get(index)
            .ok_or(VotingError::InvalidCandidateIndex)
    }

    // ── Ballot state views ────────────────────────────────────────────────────

    pub fn get_current_phase(env: Env) -> Phase {
        phase::current(&env)
    }

    pub fn get_merkle_root(env: Env) -> Result<BytesN<32>, VotingError> {
        Self::load_root(&env)
    }

    pub fn get_voting_stats(env: Env) -> Result<VotingStats, VotingError> {
        let whitelisted_voters: u32 = env
            .storage()
            .instance()
            .get(&DataKey::WhitelistedVoters)
            .ok_or(VotingError::NotInitialized)?;
        Ok(VotingStats {
            whitelisted_voters,
            commitments_submitted: ledger::commitments_submitted(&env),
            votes_revealed: ledger::votes_revealed(&env),
        })
    }

    pub fn get_commitment(env: Env, voter: Address) -> Option<CommitmentRecord> {
        ledger::load(&env, &voter)
    }

    pub fn has_committed(env: Env, voter: Address) -> bool {
        ledger::has_committed(&env, &voter)
    }

    pub fn has_revealed(env: Env, voter: Address) -> bool {
        ledger::has_revealed(&env, &voter)
    }

    // ── Tally views ───────────────────────────────────────────────────────────

    pub fn get_votes(env: Env, candidate_index: u32) -> Result<u32, VotingError> {
        Self::require_candidate(&env, candidate_index)?;
        Ok(tally::votes_of(&env, candidate_index))
    }

    pub fn get_all_votes(env: Env) -> Result<Vec<u32>, VotingError> {
        let count = Self::load_candidates(&env)?.len();
        Ok(tally::all_votes(&env, count))
    }

    /// `(winning_index, winning_votes)`; ties go to the lowest index.
    ///
    /// Callable in any phase. Before any reveal this is `(0, 0)`.
    pub fn get_winner(env: Env) -> Result<(u32, u32), VotingError> {
        let votes = Self::get_all_votes(env)?;
        Ok(tally::leading_candidate(votes.iter()))
    }

    /// Roster joined with the current tally, in index order.
    pub fn get_results(env: Env) -> Result<Vec<CandidateResult>, VotingError> {
        let candidates = Self::load_candidates(&env)?;
        let mut results = Vec::new(&env);
        for (index, name) in candidates.iter().enumerate() {
            let index = index as u32;
            results.push_back(CandidateResult {
                candidate: Candidate { index, name },
                votes: tally::votes_of(&env, index),
            });
        }
        Ok(results)
    }

    // ── Hashing helpers for off-chain tooling ─────────────────────────────────

    /// The commitment `commit_vote` expects for this choice and secret.
    pub fn compute_commitment(env: Env, candidate_index: u32, secret: Bytes) -> BytesN<32> {
        ledger::commitment_hash(&env, candidate_index, &secret)
    }

    /// The whitelist leaf the tree builder must use for `voter`.
    pub fn compute_leaf(env: Env, voter: Address) -> Option<BytesN<32>> {
        membership::voter_leaf(&env, &voter)
    }

    // ── Admin views ───────────────────────────────────────────────────────────

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&DataKey::Admin)
    }

    pub fn get_admin(env: Env) -> Result<Address, VotingError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(VotingError::NotInitialized)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), VotingError> {
        if !env.storage().instance().has(&DataKey::Admin) {
            return Err(VotingError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), VotingError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(VotingError::NotInitialized)?;
        if *caller != admin {
            return Err(VotingError::Unauthorized);
        }
        Ok(())
    }

    fn require_candidate(env: &Env, candidate_index: u32) -> Result<(), VotingError> {
        if candidate_index >= Self::load_candidates(env)?.len() {
            return Err(VotingError::InvalidCandidateIndex);
        }
        Ok(())
    }

    fn load_candidates(env: &Env) -> Result<Vec<String>, VotingError> {
        env.storage()
            .instance()
            .get(&DataKey::Candidates)
            .ok_or(VotingError::NotInitialized)
    }

    fn load_root(env: &Env) -> Result<BytesN<32>, VotingError> {
        env.storage()
            .instance()
            .get(&DataKey::MerkleRoot)
            .ok_or(VotingError::NotInitialized)
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
