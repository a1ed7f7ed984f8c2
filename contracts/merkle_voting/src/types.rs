use soroban_sdk::{contracttype, Address, String};

/// Storage keys.
///
/// `Commitment` and `Tally` live in persistent storage; everything else is
/// instance storage.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Candidates,
    MerkleRoot,
    Phase,
    WhitelistedVoters,
    CommitCount,
    RevealCount,
    Commitment(Address),
    Tally(u32),
}

/// A roster entry. `index` is the vote target identifier.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    pub index: u32,
    pub name: String,
}

/// A roster entry joined with its current tally.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateResult {
    pub candidate: Candidate,
    pub votes: u32,
}

/// Aggregate participation counters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VotingStats {
    /// Size of the off-chain whitelist, supplied at initialization.
    pub whitelisted_voters: u32,
    pub commitments_submitted: u32,
    pub votes_revealed: u32,
}
