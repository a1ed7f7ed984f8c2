#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use merkle_voting::membership::{hash_sorted_pair, voter_leaf};
use merkle_voting::{MerkleVotingContract, MerkleVotingContractClient, Phase};
use soroban_sdk::{testutils::Address as _, Address, Bytes, BytesN, Env, String, Vec};

const ROSTER: [&str; 3] = ["Ada", "Grace", "Linus"];

/// Actions covering every mutating entry point.
///
/// Voter indices wrap around the voter pool; index 2 of the pool is never
/// whitelisted so rejected proofs get exercised too.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    SetPhase { phase: u8 },
    Commit { voter: u8, candidate: u8, secret: [u8; 4] },
    Reveal { voter: u8, candidate: u8, secret: [u8; 4] },
}

fn phase_from(raw: u8) -> Phase {
    match raw % 4 {
        0 => Phase::Init,
        1 => Phase::Commit,
        2 => Phase::Reveal,
        _ => Phase::End,
    }
}

fuzz_target!(|actions: std::vec::Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let voters = [
        Address::generate(&env),
        Address::generate(&env),
        Address::generate(&env),
    ];
    let (Some(leaf0), Some(leaf1)) = (voter_leaf(&env, &voters[0]), voter_leaf(&env, &voters[1]))
    else {
        return;
    };
    let root = hash_sorted_pair(&env, &leaf0, &leaf1);
    // Two-leaf tree: each member's proof is the other leaf.
    let proofs = [
        Vec::from_array(&env, [leaf1.clone()]),
        Vec::from_array(&env, [leaf0.clone()]),
        Vec::from_array(&env, [leaf0]),
    ];

    let contract_id = env.register(MerkleVotingContract, ());
    let client = MerkleVotingContractClient::new(&env, &contract_id);

    let mut roster = Vec::new(&env);
    for name in ROSTER {
        roster.push_back(String::from_str(&env, name));
    }
    if client.try_initialize(&voters[0], &roster, &root, &2u32).is_err() {
        return;
    }

    for action in actions {
        match action {
            FuzzAction::SetPhase { phase } => {
                let _ = client.try_set_phase(&voters[0], &phase_from(phase));
            }
            FuzzAction::Commit { voter, candidate, secret } => {
                let v = voter as usize % voters.len();
                let commitment: BytesN<32> = client
                    .compute_commitment(&(candidate as u32), &Bytes::from_array(&env, &secret));
                let _ = client.try_commit_vote(&voters[v], &commitment, &proofs[v]);
            }
            FuzzAction::Reveal { voter, candidate, secret } => {
                let v = voter as usize % voters.len();
                let _ = client.try_reveal_vote(
                    &voters[v],
                    &(candidate as u32),
                    &Bytes::from_array(&env, &secret),
                );
            }
        }

        // ── Post-action invariant checks ──
        let stats = client.get_voting_stats();
        assert!(
            stats.commitments_submitted <= stats.whitelisted_voters,
            "INVARIANT VIOLATION: more commitments than whitelisted voters"
        );
        assert!(
            stats.votes_revealed <= stats.commitments_submitted,
            "INVARIANT VIOLATION: more reveals than commitments"
        );
        assert!(
            !client.has_committed(&voters[2]),
            "INVARIANT VIOLATION: outsider recorded a commitment"
        );

        let tallies = client.get_all_votes();
        assert_eq!(tallies.len(), ROSTER.len() as u32);
        let total: u32 = tallies.iter().sum();
        assert_eq!(
            total, stats.votes_revealed,
            "INVARIANT VIOLATION: tally total differs from reveal counter"
        );

        let (winner, votes) = client.get_winner();
        assert_eq!(tallies.get(winner), Some(votes));
        assert!(tallies.iter().all(|t| t <= votes));
    }
});
