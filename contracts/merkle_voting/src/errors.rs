use soroban_sdk::contracterror;

/// Failure codes returned by every fallible entry point.
///
/// Codes are part of the contract ABI; append new variants, never renumber.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VotingError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Caller is not the configured authority.
    Unauthorized = 3,
    /// `initialize` was given no candidates.
    EmptyRoster = 4,
    WrongPhase = 5,
    /// The membership proof does not recompute the whitelist root.
    NotWhitelisted = 6,
    AlreadyCommitted = 7,
    /// The voter never committed, or has already revealed. Both cases share
    /// one code so callers cannot tell them apart.
    NoCommitmentOrAlreadyRevealed = 8,
    CommitmentMismatch = 9,
    InvalidCandidateIndex = 10,
}
