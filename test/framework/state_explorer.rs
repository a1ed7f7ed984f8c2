//! # State Space Explorer
//!
//! Executes ballot action sequences, predicts each outcome with a reference
//! model, and verifies invariants after every transition.
//!
//! ## Design
//!
//! Each explored state is a `BallotSnapshot`; edges are `BallotAction`s. The
//! `BallotModel` mirrors the contract's precondition order
//! (phase → membership → record → hash → roster bound), so any divergence
//! between the error the contract returns and the one the model expects is
//! reported as a violation alongside invariant failures.

extern crate std;

use std::string::String;
use std::vec::Vec;

use merkle_voting::{Phase, VotingError};
use soroban_sdk::Bytes;

use super::generators::BallotAction;
use super::invariants::{InvariantSet, MonotonicCounters};
use super::{flatten, ActionOutcome, BallotSnapshot, TestRunSummary, VotingTestHarness};

// ── Explorer Configuration ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Maximum number of actions to execute in a single exploration run.
    pub max_steps: usize,
    /// Halt on the first violation.
    pub fail_fast: bool,
    /// Keep every snapshot for later analysis.
    pub record_snapshots: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            max_steps: 100,
            fail_fast: true,
            record_snapshots: false,
        }
    }
}

// ── Exploration Result ───────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ExplorationResult {
    pub summary: TestRunSummary,
    pub snapshots: Vec<BallotSnapshot>,
    pub action_log: Vec<(BallotAction, ActionOutcome)>,
}

impl ExplorationResult {
    pub fn passed(&self) -> bool {
        self.summary.passed()
    }
}

// ── Reference Model ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct ModelVote {
    candidate: u32,
    secret: Vec<u8>,
    revealed: bool,
}

/// Plain-Rust model of the ballot used to predict outcomes.
#[derive(Debug, Clone)]
pub struct BallotModel {
    phase: Phase,
    roster_len: u32,
    votes: Vec<Option<ModelVote>>,
    pub tallies: Vec<u32>,
}

impl BallotModel {
    pub fn new(roster_len: u32, voters: usize) -> Self {
        Self {
            phase: Phase::Init,
            roster_len,
            votes: std::vec![None; voters],
            tallies: std::vec![0; roster_len as usize],
        }
    }

    fn commit(&mut self, voter: usize, candidate: u32, secret: &[u8]) -> Result<(), VotingError> {
        if self.phase != Phase::Commit {
            return Err(VotingError::WrongPhase);
        }
        if self.votes[voter].is_some() {
            return Err(VotingError::AlreadyCommitted);
        }
        self.votes[voter] = Some(ModelVote {
            candidate,
            secret: secret.to_vec(),
            revealed: false,
        });
        Ok(())
    }

    fn outsider_commit(&self) -> Result<(), VotingError> {
        if self.phase != Phase::Commit {
            return Err(VotingError::WrongPhase);
        }
        Err(VotingError::NotWhitelisted)
    }

    fn reveal(&mut self, voter: usize, candidate: u32, secret: &[u8]) -> Result<(), VotingError> {
        if self.phase != Phase::Reveal {
            return Err(VotingError::WrongPhase);
        }
        let roster_len = self.roster_len;
        let vote = match self.votes[voter].as_mut() {
            Some(v) if !v.revealed => v,
            _ => return Err(VotingError::NoCommitmentOrAlreadyRevealed),
        };
        if vote.candidate != candidate || vote.secret.as_slice() != secret {
            return Err(VotingError::CommitmentMismatch);
        }
        if candidate >= roster_len {
            return Err(VotingError::InvalidCandidateIndex);
        }
        vote.revealed = true;
        self.tallies[candidate as usize] += 1;
        Ok(())
    }

    /// The committed `(candidate, secret)` for `voter`, if any.
    fn committed(&self, voter: usize) -> Option<(u32, Vec<u8>)> {
        self.votes[voter]
            .as_ref()
            .map(|v| (v.candidate, v.secret.clone()))
    }
}

// ── State Space Explorer ─────────────────────────────────────────────────────

/// Executes action sequences against a ballot, checking model agreement and
/// invariants after every transition.
pub struct StateExplorer<'a> {
    harness: &'a VotingTestHarness,
    invariants: InvariantSet,
    config: ExplorerConfig,
    model: BallotModel,
}

impl<'a> StateExplorer<'a> {
    pub fn new(harness: &'a VotingTestHarness, invariants: InvariantSet, config: ExplorerConfig) -> Self {
        let model = BallotModel::new(harness.candidate_count, harness.voters.len());
        Self {
            harness,
            invariants,
            config,
            model,
        }
    }

    /// Default configuration and built-in invariants.
    pub fn with_defaults(harness: &'a VotingTestHarness) -> Self {
        Self::new(harness, InvariantSet::ballot_defaults(), ExplorerConfig::default())
    }

    pub fn model(&self) -> &BallotModel {
        &self.model
    }

    /// Execute a sequence of actions, checking invariants after each.
    pub fn explore(&mut self, actions: &[BallotAction]) -> ExplorationResult {
        let mut summary = TestRunSummary::new();
        let mut snapshots = Vec::new();
        let mut action_log = Vec::new();

        let mut previous = self.harness.snapshot();
        if self.config.record_snapshots {
            snapshots.push(previous.clone());
        }

        let steps = actions.len().min(self.config.max_steps);

        for action in actions.iter().take(steps) {
            let (outcome, expected) = self.execute_action(action);
            summary.entry_points_hit.insert(action_entry_point(action));
            summary.actions_executed += 1;
            summary.transitions_observed += 1;

            let mut violations: Vec<(String, String)> = Vec::new();
            if outcome != expected {
                violations.push((
                    "model agreement".into(),
                    std::format!("contract gave {:?}, model expected {:?}", outcome, expected),
                ));
            }
            action_log.push((action.clone(), outcome));

            let snapshot = self.harness.snapshot();
            violations.extend(self.invariants.check_all(&snapshot));
            if let Err(msg) = MonotonicCounters::check_transition(&previous, &snapshot) {
                violations.push(("monotonic counters".into(), msg));
            }
            if snapshot.tallies != self.model.tallies {
                violations.push((
                    "model tallies".into(),
                    std::format!("{:?} != model {:?}", snapshot.tallies, self.model.tallies),
                ));
            }
            summary.invariant_checks += 1;

            let failed = !violations.is_empty();
            for (name, msg) in violations {
                summary.invariant_violations.push(std::format!(
                    "After action #{} ({:?}): [{}] {}",
                    summary.actions_executed,
                    action,
                    name,
                    msg
                ));
            }

            if self.config.record_snapshots {
                snapshots.push(snapshot.clone());
            }
            previous = snapshot;

            if failed && self.config.fail_fast {
                break;
            }
        }

        ExplorationResult {
            summary,
            snapshots,
            action_log,
        }
    }

    /// Run `action` on the contract and on the model.
    fn execute_action(&mut self, action: &BallotAction) -> (ActionOutcome, ActionOutcome) {
        let h = self.harness;
        let n = h.voters.len();

        match action {
            BallotAction::SetPhase { phase } => {
                let actual = flatten(h.client.try_set_phase(&h.authority, phase));
                self.model.phase = *phase;
                (actual.into(), ActionOutcome::Ok)
            }
            BallotAction::RogueSetPhase { phase } => {
                let actual = flatten(h.client.try_set_phase(&h.outsiders[0], phase));
                (
                    actual.into(),
                    ActionOutcome::ExpectedError(VotingError::Unauthorized as u32),
                )
            }
            BallotAction::Commit { voter, candidate, secret } => {
                let v = voter % n;
                let actual = h.try_commit(v, *candidate, secret);
                let expected = self.model.commit(v, *candidate, secret);
                (actual.into(), expected.into())
            }
            BallotAction::OutsiderCommit { voter, candidate } => {
                let v = voter % n;
                let actual = flatten(h.client.try_commit_vote(
                    &h.outsiders[1],
                    &h.commitment(*candidate, b"outsider"),
                    &h.proof(v),
                ));
                (actual.into(), self.model.outsider_commit().into())
            }
            BallotAction::Reveal { voter } => {
                let v = voter % n;
                // Voters without a commitment reveal an arbitrary pair.
                let (candidate, secret) = self
                    .model
                    .committed(v)
                    .unwrap_or((0, b"never-committed".to_vec()));
                let actual = h.try_reveal(v, candidate, &secret);
                let expected = self.model.reveal(v, candidate, &secret);
                (actual.into(), expected.into())
            }
            BallotAction::RevealWrongSecret { voter, secret } => {
                let v = voter % n;
                let candidate = self.model.committed(v).map(|(c, _)| c).unwrap_or(0);
                let actual = flatten(h.client.try_reveal_vote(
                    &h.voters[v],
                    &candidate,
                    &Bytes::from_slice(&h.env, secret),
                ));
                let expected = self.model.reveal(v, candidate, secret);
                (actual.into(), expected.into())
            }
        }
    }
}

impl From<Result<(), VotingError>> for ActionOutcome {
    fn from(result: Result<(), VotingError>) -> Self {
        match result {
            Ok(()) => ActionOutcome::Ok,
            Err(e) => ActionOutcome::ExpectedError(e as u32),
        }
    }
}

/// Entry point name exercised by an action, for coverage tracking.
pub fn action_entry_point(action: &BallotAction) -> String {
    match action {
        BallotAction::SetPhase { .. } | BallotAction::RogueSetPhase { .. } => "set_phase",
        BallotAction::Commit { .. } | BallotAction::OutsiderCommit { .. } => "commit_vote",
        BallotAction::Reveal { .. } | BallotAction::RevealWrongSecret { .. } => "reveal_vote",
    }
    .into()
}

/// Number of distinct mutating entry points.
pub const TOTAL_ENTRY_POINTS: usize = 3;
